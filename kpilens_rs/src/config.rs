//! Configuration for the audit engine.
//!
//! Loads an optional `kpilens.toml` (or an explicit `--config` path) and
//! merges it over the built-in defaults. Values outside their valid ranges
//! are rejected before any scoring happens; the pure scoring functions never
//! see a bad threshold.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_VANITY_MARGIN: i32 = 2;
pub const DEFAULT_MIN_VALUE: i32 = 2;
pub const DEFAULT_RECENT_DAYS: u32 = 30;
pub const DEFAULT_MODERATE_DAYS: u32 = 180;

/// Outcome-oriented note language. Each occurrence raises sentiment by one.
pub const DEFAULT_OUTCOME_KEYWORDS: &[&str] = &[
    "revenue",
    "retention",
    "churn",
    "conversion",
    "drove",
    "decision",
    "goal",
    "action",
    "forecast",
    "pipeline",
];

/// Appearance-oriented note language. Each occurrence lowers sentiment by one.
pub const DEFAULT_APPEARANCE_KEYWORDS: &[&str] = &[
    "looks good",
    "looks impressive",
    "exec wanted",
    "exec asked",
    "not used",
    "for show",
    "nobody",
    "no one uses",
    "legacy",
    "vanity",
];

/// Active thresholds and keyword sets for one audit run.
///
/// Threaded explicitly into the scorer so repeated runs with different
/// weights stay independently reproducible.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Vanity wins when `vanity_score >= value_score + vanity_margin`.
    pub vanity_margin: i32,
    /// Valuable requires `value_score >= min_value`.
    pub min_value: i32,
    /// Upper bound (days) of the Recent bucket.
    pub recent_days: u32,
    /// Upper bound (days) of the Moderate bucket; beyond it is Stale.
    pub moderate_days: u32,
    pub outcome_keywords: Vec<String>,
    pub appearance_keywords: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            vanity_margin: DEFAULT_VANITY_MARGIN,
            min_value: DEFAULT_MIN_VALUE,
            recent_days: DEFAULT_RECENT_DAYS,
            moderate_days: DEFAULT_MODERATE_DAYS,
            outcome_keywords: DEFAULT_OUTCOME_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            appearance_keywords: DEFAULT_APPEARANCE_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// On-disk layout of `kpilens.toml`. All tables and keys are optional;
/// anything absent falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    thresholds: ThresholdsTable,
    keywords: KeywordsTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThresholdsTable {
    vanity_margin: Option<i32>,
    min_value: Option<i32>,
    recent_days: Option<u32>,
    moderate_days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeywordsTable {
    outcome: Option<Vec<String>>,
    appearance: Option<Vec<String>>,
}

impl AuditConfig {
    /// Load and validate a config file, merging it over the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| format!("cannot parse config {}: {}", path.display(), e))?;

        let defaults = Self::default();
        let config = Self {
            vanity_margin: file.thresholds.vanity_margin.unwrap_or(defaults.vanity_margin),
            min_value: file.thresholds.min_value.unwrap_or(defaults.min_value),
            recent_days: file.thresholds.recent_days.unwrap_or(defaults.recent_days),
            moderate_days: file
                .thresholds
                .moderate_days
                .unwrap_or(defaults.moderate_days),
            outcome_keywords: file.keywords.outcome.unwrap_or(defaults.outcome_keywords),
            appearance_keywords: file
                .keywords
                .appearance
                .unwrap_or(defaults.appearance_keywords),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load `kpilens.toml` from the given directory if present, otherwise
    /// return the defaults.
    pub fn load(root: &Path) -> Result<Self, String> {
        let path = root.join("kpilens.toml");
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Range-check every threshold. Called at the configuration boundary so
    /// the scorer can stay a total function.
    pub fn validate(&self) -> Result<(), String> {
        if self.recent_days == 0 {
            return Err("recent_days must be at least 1".to_string());
        }
        if self.moderate_days <= self.recent_days {
            return Err(format!(
                "moderate_days ({}) must be greater than recent_days ({})",
                self.moderate_days, self.recent_days
            ));
        }
        if self.vanity_margin < 0 {
            return Err(format!(
                "vanity_margin must be >= 0 (got {})",
                self.vanity_margin
            ));
        }
        if self.min_value < 0 {
            return Err(format!("min_value must be >= 0 (got {})", self.min_value));
        }
        if self.outcome_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err("outcome_keywords must contain at least one keyword".to_string());
        }
        if self.appearance_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err("appearance_keywords must contain at least one keyword".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = AuditConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vanity_margin, 2);
        assert_eq!(config.min_value, 2);
        assert_eq!(config.recent_days, 30);
        assert_eq!(config.moderate_days, 180);
        assert!(config.outcome_keywords.contains(&"revenue".to_string()));
        assert!(
            config
                .appearance_keywords
                .contains(&"looks good".to_string())
        );
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let config = AuditConfig::load(temp.path()).expect("defaults");
        assert_eq!(config.recent_days, DEFAULT_RECENT_DAYS);
    }

    #[test]
    fn load_partial_file_merges_over_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("kpilens.toml");
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(
            file,
            r#"
[thresholds]
vanity_margin = 3
recent_days = 14

[keywords]
outcome = ["revenue", "margin"]
"#
        )
        .expect("write config");

        let config = AuditConfig::load(temp.path()).expect("load");
        assert_eq!(config.vanity_margin, 3);
        assert_eq!(config.recent_days, 14);
        // untouched keys keep their defaults
        assert_eq!(config.min_value, DEFAULT_MIN_VALUE);
        assert_eq!(config.moderate_days, DEFAULT_MODERATE_DAYS);
        assert_eq!(config.outcome_keywords, vec!["revenue", "margin"]);
        assert_eq!(
            config.appearance_keywords.len(),
            DEFAULT_APPEARANCE_KEYWORDS.len()
        );
    }

    #[test]
    fn rejects_zero_recent_days() {
        let config = AuditConfig {
            recent_days: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("recent_days"));
    }

    #[test]
    fn rejects_inverted_windows() {
        let config = AuditConfig {
            recent_days: 200,
            moderate_days: 180,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("moderate_days"));
    }

    #[test]
    fn rejects_negative_margin() {
        let config = AuditConfig {
            vanity_margin: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_keyword_set() {
        let config = AuditConfig {
            outcome_keywords: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_bad_toml_is_a_descriptive_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("kpilens.toml");
        std::fs::write(&path, "thresholds = nonsense").expect("write");
        let err = AuditConfig::load_from_path(&path).unwrap_err();
        assert!(err.contains("cannot parse config"));
    }
}
