//! # kpilens
//!
//! **KPI audit engine** - classifies organizational metrics as vanity
//! (visible but decision-inert) or valuable (demonstrably driving
//! decisions), and recommends per department which metrics to keep, watch,
//! or retire.
//!
//! ## How it works
//!
//! - **Recency normalization** - free-text descriptors ("2 weeks ago",
//!   "Never") become comparable buckets
//! - **Note sentiment** - interpretation notes are scanned for
//!   outcome-oriented vs. appearance-oriented language
//! - **Scoring** - each record gets a vanity score and a value score from
//!   fixed, monotone weights
//! - **Recommendations** - per department: ranked metrics, a keep list, a
//!   removal list for dashboard-visible vanity metrics, and a manual-review
//!   list for the heuristic boundary
//!
//! The pipeline is a pure function of one in-memory snapshot: same records
//! and configuration in, bit-identical report out.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust
//! use kpilens::{run_audit, AuditConfig, MetricRecord, DEFAULT_TOP_N};
//!
//! let records = vec![MetricRecord {
//!     department: "Sales".to_string(),
//!     metric_name: "Win Rate".to_string(),
//!     used_in_decision_making: true,
//!     last_used_for_decision: "3 days ago".to_string(),
//!     ..Default::default()
//! }];
//!
//! let report = run_audit(&records, &AuditConfig::default(), DEFAULT_TOP_N);
//! assert_eq!(report.departments[0].department, "Sales");
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! kpilens metrics.csv                 # Human-readable audit report
//! kpilens metrics.csv --json          # Machine-readable report
//! kpilens metrics.csv -d Sales        # Single-department view
//! kpilens metrics.csv --top 5         # Longer keep list
//! ```

/// Department grouping in first-appearance order.
pub mod aggregate;

/// Command-line argument parsing.
pub mod args;

/// The full pipeline: records in, [`AuditReport`] out.
pub mod audit;

/// ANSI color helpers for the CLI report.
pub mod colors;

/// Thresholds and keyword sets, with optional `kpilens.toml` support.
pub mod config;

/// CSV ingestion of the metric inventory.
pub mod ingest;

/// Human and JSON report rendering.
pub mod output;

/// Free-text recency normalization ("2 weeks ago" → buckets).
pub mod recency;

/// Ranking, keep/retire selection, and justification strings.
pub mod recommend;

/// Vanity/value scoring of individual records.
pub mod scorer;

/// Keyword sentiment for interpretation notes.
pub mod sentiment;

/// Common types used throughout the crate.
pub mod types;

pub use audit::run_audit;
pub use config::AuditConfig;
pub use recency::{PatternRecency, RecencyParser};
pub use scorer::Scorer;
pub use sentiment::{KeywordSentiment, SentimentClassifier};
pub use types::{
    AuditReport, Classification, ColorMode, DepartmentReport, MetricRecord, OutputMode, Recency,
    Recommendation, ScoredMetric, DEFAULT_TOP_N,
};
