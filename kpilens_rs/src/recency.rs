//! Free-text recency normalization.
//!
//! Inventory exports describe review dates loosely ("2 weeks ago",
//! "6 months", "Never"). Normalization maps that text onto four buckets and
//! is total: anything unparseable becomes `Unknown` rather than failing the
//! pipeline. `Unknown` scores like `Stale` downstream, since an unknown
//! review history cannot be assumed recent.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::AuditConfig;
use crate::types::Recency;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

/// `"3 days"`, `"2 weeks ago"`, `"1 year"` etc.
fn regex_unit_count() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^(\d+)\s*(day|week|month|year)s?(?:\s+ago)?$"))
}

/// Pluggable normalization so date-parsing rules can be swapped or
/// regionalized without touching the scorer.
pub trait RecencyParser {
    fn normalize(&self, raw: &str) -> Recency;
}

/// Default parser: relative words plus `<count> <unit> [ago]` patterns.
#[derive(Clone, Copy, Debug)]
pub struct PatternRecency {
    recent_days: u32,
    moderate_days: u32,
}

impl PatternRecency {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            recent_days: config.recent_days,
            moderate_days: config.moderate_days,
        }
    }

    fn bucket(&self, days: u64) -> Recency {
        if days <= u64::from(self.recent_days) {
            Recency::Recent
        } else if days <= u64::from(self.moderate_days) {
            Recency::Moderate
        } else {
            Recency::Stale
        }
    }
}

impl RecencyParser for PatternRecency {
    fn normalize(&self, raw: &str) -> Recency {
        let trimmed = raw.trim().to_ascii_lowercase();
        if trimmed.is_empty() {
            return Recency::Unknown;
        }

        match trimmed.as_str() {
            "today" | "now" => return self.bucket(0),
            "yesterday" => return self.bucket(1),
            "last week" => return self.bucket(7),
            "last month" => return self.bucket(30),
            "last year" => return self.bucket(365),
            "never" | "unknown" | "n/a" | "na" | "-" => return Recency::Unknown,
            _ => {}
        }

        if let Some(caps) = regex_unit_count().captures(&trimmed) {
            let count: u64 = caps[1].parse().unwrap_or(u64::MAX);
            let days = match &caps[2] {
                "day" => count,
                "week" => count.saturating_mul(7),
                "month" => count.saturating_mul(30),
                "year" => count.saturating_mul(365),
                _ => count,
            };
            return self.bucket(days);
        }

        Recency::Unknown
    }
}
