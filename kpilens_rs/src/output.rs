//! Report rendering: human-readable text and machine-readable JSON.
//!
//! Both modes carry the active thresholds so downstream consumers can label
//! results correctly when the configuration changes between runs.

use std::io::{self, Write};

use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::colors::Painter;
use crate::types::{AuditReport, DepartmentReport};

fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn render_department(
    department: &DepartmentReport,
    painter: &Painter,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(
        out,
        "\n{} {}",
        painter.header("=="),
        painter.department(&department.department)
    )?;

    writeln!(out, "  {:<4} {:<36} {:>5} {:>6}  class", "rank", "metric", "value", "vanity")?;
    for (index, metric) in department.ranked_metrics.iter().enumerate() {
        let class = metric.classification.as_str();
        let class_colored = match metric.classification {
            crate::types::Classification::Vanity => painter.error(class),
            crate::types::Classification::Valuable => painter.ok(class),
            crate::types::Classification::Neutral => painter.warn(class),
        };
        writeln!(
            out,
            "  {:<4} {:<36} {:>5} {:>6}  {}",
            index + 1,
            metric.record.metric_name,
            metric.value_score,
            metric.vanity_score,
            class_colored
        )?;
    }

    writeln!(out, "\n  {}", painter.header("Action plan"))?;

    writeln!(out, "  keep:")?;
    if department.top_recommendations.is_empty() {
        writeln!(out, "    {}", painter.dim("(no non-vanity metrics)"))?;
    }
    for rec in &department.top_recommendations {
        let dashboard_hint = if rec.visible_in_dashboard {
            "already in dashboard"
        } else {
            "not in dashboard - consider adding"
        };
        writeln!(
            out,
            "    {} {} (value {}) - {} [{}]",
            painter.ok("+"),
            rec.metric_name,
            painter.number(rec.score),
            painter.dim(&rec.justification),
            dashboard_hint
        )?;
    }

    writeln!(out, "  retire:")?;
    if department.removal_candidates.is_empty() {
        writeln!(out, "    {}", painter.dim("(nothing to remove)"))?;
    }
    for rec in &department.removal_candidates {
        writeln!(
            out,
            "    {} {} (vanity {}) - {}",
            painter.error("-"),
            rec.metric_name,
            painter.number(rec.score),
            painter.dim(&rec.justification)
        )?;
    }

    writeln!(out, "  review:")?;
    if department.review_list.is_empty() {
        writeln!(out, "    {}", painter.dim("(nothing flagged)"))?;
    }
    for name in &department.review_list {
        writeln!(out, "    {} {}", painter.warn("?"), name)?;
    }

    writeln!(
        out,
        "  dashboard reduction potential: {} ({} of {} visible metrics)",
        painter.number(format_percent(department.potential_dashboard_reduction)),
        department.removal_candidates.len(),
        department.dashboard_total
    )?;

    Ok(())
}

pub fn render_human(
    report: &AuditReport,
    painter: &Painter,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "{}", painter.header("kpilens audit report"))?;
    writeln!(out)?;
    writeln!(out, "Dataset overview")?;
    writeln!(
        out,
        "  total metrics:     {}",
        painter.number(report.overview.total_metrics)
    )?;
    writeln!(
        out,
        "  departments:       {}",
        painter.number(report.overview.departments)
    )?;
    writeln!(
        out,
        "  dashboard-visible: {}",
        painter.number(report.overview.dashboard_visible)
    )?;
    writeln!(
        out,
        "  decision-driving:  {}",
        painter.number(report.overview.decision_driving)
    )?;
    if report.skipped > 0 {
        writeln!(
            out,
            "  skipped records:   {} (missing department or metric name)",
            painter.warn(&report.skipped.to_string())
        )?;
    }

    writeln!(
        out,
        "\nThresholds: vanity_margin={} min_value={} recent_days={} moderate_days={}",
        report.config.vanity_margin,
        report.config.min_value,
        report.config.recent_days,
        report.config.moderate_days
    )?;

    for department in &report.departments {
        render_department(department, painter, out)?;
    }

    Ok(())
}

pub fn render_json(report: &AuditReport, out: &mut dyn Write) -> io::Result<()> {
    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    let doc = json!({
        "tool": "kpilens",
        "version": env!("CARGO_PKG_VERSION"),
        "generated_at": generated_at,
        "thresholds": {
            "vanity_margin": report.config.vanity_margin,
            "min_value": report.config.min_value,
            "recent_days": report.config.recent_days,
            "moderate_days": report.config.moderate_days,
        },
        "keywords": {
            "outcome": report.config.outcome_keywords,
            "appearance": report.config.appearance_keywords,
        },
        "overview": report.overview,
        "skipped": report.skipped,
        "departments": report.departments,
    });

    serde_json::to_writer_pretty(&mut *out, &doc).map_err(io::Error::other)?;
    writeln!(out)
}
