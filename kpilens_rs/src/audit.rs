//! The full analysis pipeline: records in, department reports out.
//!
//! Pure and re-entrant: the same record snapshot and configuration always
//! produce identical output, and nothing mutates a stage's result after
//! handoff. Records missing both halves of their identity (department and
//! metric name) are excluded and counted, never silently dropped.

use crate::aggregate::group_by_department;
use crate::config::AuditConfig;
use crate::recency::PatternRecency;
use crate::recommend::build_department_report;
use crate::scorer::Scorer;
use crate::sentiment::KeywordSentiment;
use crate::types::{AuditReport, MetricRecord, Overview, ScoredMetric};

fn overview(records: &[&MetricRecord], departments: usize) -> Overview {
    Overview {
        total_metrics: records.len(),
        departments,
        dashboard_visible: records.iter().filter(|r| r.visible_in_dashboard).count(),
        decision_driving: records
            .iter()
            .filter(|r| r.used_in_decision_making)
            .count(),
    }
}

/// Run one audit over a snapshot of records.
///
/// `top_n` bounds the keep list per department (the classic report uses 3).
pub fn run_audit(records: &[MetricRecord], config: &AuditConfig, top_n: usize) -> AuditReport {
    let (valid, skipped): (Vec<&MetricRecord>, Vec<&MetricRecord>) =
        records.iter().partition(|r| r.has_identity());

    let recency = PatternRecency::new(config);
    let sentiment = KeywordSentiment::new(config);
    let scorer = Scorer::new(config, &recency, &sentiment);

    let scored: Vec<ScoredMetric> = valid.iter().map(|r| scorer.score(r)).collect();
    let groups = group_by_department(scored);

    let departments: Vec<_> = groups
        .into_iter()
        .map(|(department, metrics)| build_department_report(department, metrics, top_n))
        .collect();

    AuditReport {
        config: config.clone(),
        overview: overview(&valid, departments.len()),
        skipped: skipped.len(),
        departments,
    }
}
