use serde::Serialize;

/// Upper bound of the vanity score: 3 + 2 + 2 + 2 fixed contributions
/// plus the capped sentiment term.
pub const MAX_VANITY: i32 = 9 + SENTIMENT_CAP;

/// Upper bound of the value score: 3 + 2 + 1 fixed contributions
/// plus the capped sentiment term.
pub const MAX_VALUE: i32 = 6 + SENTIMENT_CAP;

/// Sentiment contributes at most this much to either score, which keeps
/// both scores bounded no matter how keyword-dense the notes are.
pub const SENTIMENT_CAP: i32 = 3;

pub const DEFAULT_TOP_N: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputMode {
    Human,
    Json,
}

/// Normalized recency bucket for a free-text time descriptor.
///
/// Variant order doubles as the ranking order: `Recent < Moderate < Stale
/// < Unknown`, so "more recent" sorts first with the derived `Ord`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recency {
    Recent,
    Moderate,
    Stale,
    /// Unparseable, blank, or explicitly never. Scores like `Stale`.
    Unknown,
}

impl Recency {
    pub fn is_stale_or_unknown(self) -> bool {
        matches!(self, Recency::Stale | Recency::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Recency::Recent => "recent",
            Recency::Moderate => "moderate",
            Recency::Stale => "stale",
            Recency::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Vanity,
    Valuable,
    Neutral,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Vanity => "vanity",
            Classification::Valuable => "valuable",
            Classification::Neutral => "neutral",
        }
    }
}

/// One row of the metric inventory, immutable once parsed.
///
/// The recency fields stay raw free text ("2 weeks ago", "Never"); they are
/// normalized on demand by the scorer so the record mirrors the source CSV.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MetricRecord {
    pub department: String,
    pub metric_name: String,
    pub visible_in_dashboard: bool,
    pub used_in_decision_making: bool,
    pub executive_requested: bool,
    pub last_reviewed: String,
    pub last_used_for_decision: String,
    pub notes: String,
}

impl MetricRecord {
    /// Records without both identity fields cannot be reported on and are
    /// excluded from analysis (counted, never silently dropped).
    pub fn has_identity(&self) -> bool {
        !self.department.trim().is_empty() && !self.metric_name.trim().is_empty()
    }
}

/// A single scoring reason with the weight it contributed.
#[derive(Clone, Debug, Serialize)]
pub struct Contribution {
    pub label: String,
    pub weight: i32,
}

impl Contribution {
    pub fn new(label: &str, weight: i32) -> Self {
        Self {
            label: label.to_string(),
            weight,
        }
    }
}

/// A metric record together with its scores and the reasons behind them.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredMetric {
    pub record: MetricRecord,
    pub vanity_score: i32,
    pub value_score: i32,
    pub classification: Classification,
    pub last_reviewed_recency: Recency,
    pub last_used_recency: Recency,
    pub sentiment: i32,
    pub vanity_reasons: Vec<Contribution>,
    pub value_reasons: Vec<Contribution>,
}

/// One keep/retire recommendation with a deterministic justification.
#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    pub metric_name: String,
    pub score: i32,
    pub justification: String,
    pub visible_in_dashboard: bool,
    pub last_used_for_decision: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct DepartmentReport {
    pub department: String,
    /// Every metric of the department, descending by value score;
    /// ties broken by most recent decision use, then metric name.
    pub ranked_metrics: Vec<ScoredMetric>,
    /// Top non-vanity metrics in ranking order (never padded with vanity).
    pub top_recommendations: Vec<Recommendation>,
    /// Vanity-classified, dashboard-visible metrics.
    pub removal_candidates: Vec<Recommendation>,
    /// Neutral metrics with a stale or unknown review history, flagged for
    /// manual governance review.
    pub review_list: Vec<String>,
    pub dashboard_total: usize,
    /// removal_candidates / dashboard_total, as a ratio in [0, 1].
    /// Exactly 0.0 when the department has nothing on the dashboard.
    pub potential_dashboard_reduction: f64,
}

/// Dataset-level counters shown in the report header.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Overview {
    pub total_metrics: usize,
    pub departments: usize,
    pub dashboard_visible: usize,
    pub decision_driving: usize,
}

/// The full audit result: one report per department (in first-appearance
/// order) plus the configuration that produced it, for auditability.
#[derive(Clone, Debug, Serialize)]
pub struct AuditReport {
    pub config: crate::config::AuditConfig,
    pub overview: Overview,
    /// Records excluded for missing identity fields.
    pub skipped: usize,
    pub departments: Vec<DepartmentReport>,
}
