//! Keyword-based sentiment for interpretation notes.
//!
//! A signed count: outcome-oriented language ("revenue", "drove",
//! "decision") raises the score, appearance-oriented language ("looks good",
//! "for show") lowers it. Case-insensitive substring matching, one point per
//! occurrence of each distinct keyword. This is a heuristic signal, not a
//! guarantee; borderline metrics end up on the manual review list for
//! exactly that reason.

use crate::config::AuditConfig;

/// Pluggable note classification so keyword sets can be swapped or
/// regionalized without touching the scorer.
pub trait SentimentClassifier {
    /// Signed sentiment: positive = outcome language, negative = appearance
    /// language, 0 = empty or no matches.
    fn classify(&self, text: &str) -> i32;
}

pub struct KeywordSentiment {
    outcome: Vec<String>,
    appearance: Vec<String>,
}

impl KeywordSentiment {
    pub fn new(config: &AuditConfig) -> Self {
        let lower = |set: &[String]| {
            set.iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect::<Vec<_>>()
        };
        Self {
            outcome: lower(&config.outcome_keywords),
            appearance: lower(&config.appearance_keywords),
        }
    }
}

fn count_occurrences(haystack: &str, needle: &str) -> i32 {
    haystack.matches(needle).count() as i32
}

impl SentimentClassifier for KeywordSentiment {
    fn classify(&self, text: &str) -> i32 {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return 0;
        }
        let lower = trimmed.to_lowercase();

        let mut score = 0;
        for keyword in &self.outcome {
            score += count_occurrences(&lower, keyword);
        }
        for keyword in &self.appearance {
            score -= count_occurrences(&lower, keyword);
        }
        score
    }
}
