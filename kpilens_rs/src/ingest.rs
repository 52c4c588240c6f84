//! CSV ingestion for the metric inventory.
//!
//! Reads the classic audit export layout (`Department`, `Metric_Name`,
//! `Visible_in_Dashboard`, ...). Header matching is case-insensitive and
//! optional columns may be absent entirely; only the two identity columns
//! are required. Per-row problems degrade gracefully: boolean-ish garbage
//! reads as `false`, missing cells as empty strings, and unreadable rows are
//! warned about and skipped rather than aborting the run.

use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::types::MetricRecord;

pub const COL_DEPARTMENT: &str = "Department";
pub const COL_METRIC_NAME: &str = "Metric_Name";
pub const COL_VISIBLE: &str = "Visible_in_Dashboard";
pub const COL_USED: &str = "Used_in_Decision_Making";
pub const COL_EXEC: &str = "Executive_Requested";
pub const COL_LAST_REVIEWED: &str = "Last_Reviewed";
pub const COL_LAST_USED: &str = "Metric_Last_Used_For_Decision";
pub const COL_NOTES: &str = "Interpretation_Notes";

/// `yes`/`y`/`true`/`1` in any casing; everything else (blank, `No`,
/// garbage) is `false`. Never fails.
pub fn parse_bool_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

struct ColumnMap {
    department: usize,
    metric_name: usize,
    visible: Option<usize>,
    used: Option<usize>,
    exec: Option<usize>,
    last_reviewed: Option<usize>,
    last_used: Option<usize>,
    notes: Option<usize>,
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let require = |name: &str| -> Result<usize> {
            find_column(headers, name).with_context(|| {
                format!(
                    "missing required column '{}' (found: {})",
                    name,
                    headers.iter().collect::<Vec<_>>().join(", ")
                )
            })
        };

        Ok(Self {
            department: require(COL_DEPARTMENT)?,
            metric_name: require(COL_METRIC_NAME)?,
            visible: find_column(headers, COL_VISIBLE),
            used: find_column(headers, COL_USED),
            exec: find_column(headers, COL_EXEC),
            last_reviewed: find_column(headers, COL_LAST_REVIEWED),
            last_used: find_column(headers, COL_LAST_USED),
            notes: find_column(headers, COL_NOTES),
        })
    }

    fn to_record(&self, row: &StringRecord) -> MetricRecord {
        let text = |idx: usize| row.get(idx).unwrap_or("").to_string();
        let opt_text = |idx: Option<usize>| idx.map(|i| text(i)).unwrap_or_default();
        let flag = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(parse_bool_flag)
                .unwrap_or(false)
        };

        MetricRecord {
            department: text(self.department),
            metric_name: text(self.metric_name),
            visible_in_dashboard: flag(self.visible),
            used_in_decision_making: flag(self.used),
            executive_requested: flag(self.exec),
            last_reviewed: opt_text(self.last_reviewed),
            last_used_for_decision: opt_text(self.last_used),
            notes: opt_text(self.notes),
        }
    }
}

/// Load every row of the inventory CSV. Fails only on unreadable files or a
/// missing identity column; individual bad rows are warned and skipped.
pub fn load_records(path: &Path) -> Result<Vec<MetricRecord>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("cannot open {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("cannot read headers of {}", path.display()))?
        .clone();

    if headers.is_empty() {
        bail!("{} has no header row", path.display());
    }
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        match row {
            Ok(row) => records.push(columns.to_record(&row)),
            Err(err) => {
                // +2: one for the header, one for 1-based line numbers
                eprintln!("[kpilens][warn] skipping row {}: {}", index + 2, err);
            }
        }
    }
    Ok(records)
}
