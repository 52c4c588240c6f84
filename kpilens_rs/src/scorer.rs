//! Vanity/value scoring for a single metric record.
//!
//! Two additive scores per record, each built from fixed-weight conditions
//! plus a capped sentiment term:
//!
//! - **vanity_score** (0..=[`MAX_VANITY`]): visibility without decision use,
//!   executive ornamentation, stale history, appearance-flavored notes.
//! - **value_score** (0..=[`MAX_VALUE`]): decision use, recent activity,
//!   outcome-flavored notes.
//!
//! Both are pure functions of one record; no score depends on other records.
//! Every contribution is recorded as a labeled weight so the recommendation
//! layer can rebuild justifications deterministically.
//!
//! [`MAX_VANITY`]: crate::types::MAX_VANITY
//! [`MAX_VALUE`]: crate::types::MAX_VALUE

use crate::config::AuditConfig;
use crate::recency::RecencyParser;
use crate::sentiment::SentimentClassifier;
use crate::types::{
    Classification, Contribution, MetricRecord, Recency, ScoredMetric, MAX_VALUE, MAX_VANITY,
    SENTIMENT_CAP,
};

/// Fixed condition weights. Monotone design choices, not physical constants.
pub const W_VISIBLE_UNUSED: i32 = 3;
pub const W_EXEC_UNUSED: i32 = 2;
pub const W_REVIEW_STALE: i32 = 2;
pub const W_USE_STALE: i32 = 2;
pub const W_USED: i32 = 3;
pub const W_USED_RECENTLY: i32 = 2;
pub const W_REVIEWED_RECENTLY: i32 = 1;

/// Derive the classification from the two scores and the active thresholds.
/// Never stored apart from the scores that produced it.
pub fn classify(vanity_score: i32, value_score: i32, config: &AuditConfig) -> Classification {
    if vanity_score >= value_score + config.vanity_margin && vanity_score > 0 {
        Classification::Vanity
    } else if value_score > vanity_score && value_score >= config.min_value {
        Classification::Valuable
    } else {
        Classification::Neutral
    }
}

/// Scores records against one configuration with pluggable recency and
/// sentiment heuristics.
pub struct Scorer<'a> {
    config: &'a AuditConfig,
    recency: &'a dyn RecencyParser,
    sentiment: &'a dyn SentimentClassifier,
}

impl<'a> Scorer<'a> {
    pub fn new(
        config: &'a AuditConfig,
        recency: &'a dyn RecencyParser,
        sentiment: &'a dyn SentimentClassifier,
    ) -> Self {
        Self {
            config,
            recency,
            sentiment,
        }
    }

    /// Score one record. Total: missing optional fields have already
    /// defaulted at ingestion, and recency/sentiment never fail.
    pub fn score(&self, record: &MetricRecord) -> ScoredMetric {
        let last_reviewed = self.recency.normalize(&record.last_reviewed);
        let last_used = self.recency.normalize(&record.last_used_for_decision);
        let sentiment = self.sentiment.classify(&record.notes);

        let mut vanity_reasons: Vec<Contribution> = Vec::new();
        let mut value_reasons: Vec<Contribution> = Vec::new();

        if record.visible_in_dashboard && !record.used_in_decision_making {
            vanity_reasons.push(Contribution::new(
                "visible in dashboard but not used in decisions",
                W_VISIBLE_UNUSED,
            ));
        }
        if record.executive_requested && !record.used_in_decision_making {
            vanity_reasons.push(Contribution::new(
                "executive-requested but not used in decisions",
                W_EXEC_UNUSED,
            ));
        }
        if last_reviewed.is_stale_or_unknown() {
            vanity_reasons.push(Contribution::new(
                "last review is stale or unknown",
                W_REVIEW_STALE,
            ));
        }
        if last_used.is_stale_or_unknown() {
            vanity_reasons.push(Contribution::new(
                "last decision use is stale or unknown",
                W_USE_STALE,
            ));
        }
        if sentiment < 0 {
            vanity_reasons.push(Contribution::new(
                "appearance-oriented language in notes",
                (-sentiment).min(SENTIMENT_CAP),
            ));
        }

        if record.used_in_decision_making {
            value_reasons.push(Contribution::new("actively used in decisions", W_USED));
        }
        if last_used == Recency::Recent {
            value_reasons.push(Contribution::new(
                "recently used for a decision",
                W_USED_RECENTLY,
            ));
        }
        if matches!(last_reviewed, Recency::Recent | Recency::Moderate) {
            value_reasons.push(Contribution::new("reviewed recently", W_REVIEWED_RECENTLY));
        }
        if sentiment > 0 {
            value_reasons.push(Contribution::new(
                "outcome-oriented language in notes",
                sentiment.min(SENTIMENT_CAP),
            ));
        }

        let vanity_score: i32 = vanity_reasons.iter().map(|c| c.weight).sum();
        let value_score: i32 = value_reasons.iter().map(|c| c.weight).sum();
        debug_assert!((0..=MAX_VANITY).contains(&vanity_score));
        debug_assert!((0..=MAX_VALUE).contains(&value_score));

        ScoredMetric {
            record: record.clone(),
            vanity_score,
            value_score,
            classification: classify(vanity_score, value_score, self.config),
            last_reviewed_recency: last_reviewed,
            last_used_recency: last_used,
            sentiment,
            vanity_reasons,
            value_reasons,
        }
    }
}
