//! Per-department ranking and recommendations.
//!
//! Builds one [`DepartmentReport`] from a department's scored metrics:
//! rank by value, pick the top non-vanity metrics to keep, flag
//! dashboard-visible vanity metrics for removal, and compute how much of the
//! dashboard could be retired. Justification strings are rebuilt
//! deterministically from the scoring contributions, so the same input
//! always yields the same wording.

use crate::types::{
    Classification, Contribution, DepartmentReport, Recommendation, ScoredMetric,
};

/// Descending by value score, ties by most recent decision use, then by
/// metric name. Stable and deterministic.
pub fn rank_metrics(metrics: &mut [ScoredMetric]) {
    metrics.sort_by(|a, b| {
        b.value_score
            .cmp(&a.value_score)
            .then_with(|| a.last_used_recency.cmp(&b.last_used_recency))
            .then_with(|| a.record.metric_name.cmp(&b.record.metric_name))
    });
}

/// Join the contributions that cumulatively account for at least half of the
/// score, heaviest first (insertion order on equal weights).
pub fn dominant_reasons(contributions: &[Contribution]) -> String {
    let total: i32 = contributions.iter().map(|c| c.weight).sum();
    if total <= 0 {
        return "no strong signals".to_string();
    }

    let mut sorted: Vec<&Contribution> = contributions.iter().collect();
    sorted.sort_by(|a, b| b.weight.cmp(&a.weight));

    let mut picked: Vec<&str> = Vec::new();
    let mut cumulative = 0;
    for contribution in sorted {
        picked.push(&contribution.label);
        cumulative += contribution.weight;
        if 2 * cumulative >= total {
            break;
        }
    }
    picked.join("; ")
}

fn keep_recommendation(metric: &ScoredMetric) -> Recommendation {
    Recommendation {
        metric_name: metric.record.metric_name.clone(),
        score: metric.value_score,
        justification: dominant_reasons(&metric.value_reasons),
        visible_in_dashboard: metric.record.visible_in_dashboard,
        last_used_for_decision: metric.record.last_used_for_decision.clone(),
    }
}

fn retire_recommendation(metric: &ScoredMetric) -> Recommendation {
    Recommendation {
        metric_name: metric.record.metric_name.clone(),
        score: metric.vanity_score,
        justification: dominant_reasons(&metric.vanity_reasons),
        visible_in_dashboard: metric.record.visible_in_dashboard,
        last_used_for_decision: metric.record.last_used_for_decision.clone(),
    }
}

pub fn build_department_report(
    department: String,
    mut metrics: Vec<ScoredMetric>,
    top_n: usize,
) -> DepartmentReport {
    rank_metrics(&mut metrics);

    let dashboard_total = metrics
        .iter()
        .filter(|m| m.record.visible_in_dashboard)
        .count();

    let top_recommendations: Vec<Recommendation> = metrics
        .iter()
        .filter(|m| m.classification != Classification::Vanity)
        .take(top_n)
        .map(keep_recommendation)
        .collect();

    let removal_candidates: Vec<Recommendation> = metrics
        .iter()
        .filter(|m| {
            m.classification == Classification::Vanity && m.record.visible_in_dashboard
        })
        .map(retire_recommendation)
        .collect();

    let review_list: Vec<String> = metrics
        .iter()
        .filter(|m| {
            m.classification == Classification::Neutral
                && m.last_reviewed_recency.is_stale_or_unknown()
        })
        .map(|m| m.record.metric_name.clone())
        .collect();

    let potential_dashboard_reduction = if dashboard_total == 0 {
        0.0
    } else {
        removal_candidates.len() as f64 / dashboard_total as f64
    };

    DepartmentReport {
        department,
        ranked_metrics: metrics,
        top_recommendations,
        removal_candidates,
        review_list,
        dashboard_total,
        potential_dashboard_reduction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::recency::PatternRecency;
    use crate::scorer::Scorer;
    use crate::sentiment::KeywordSentiment;
    use crate::types::{MetricRecord, DEFAULT_TOP_N};

    fn score(record: MetricRecord) -> ScoredMetric {
        let config = AuditConfig::default();
        let recency = PatternRecency::new(&config);
        let sentiment = KeywordSentiment::new(&config);
        Scorer::new(&config, &recency, &sentiment).score(&record)
    }

    fn record(name: &str) -> MetricRecord {
        MetricRecord {
            department: "Sales".to_string(),
            metric_name: name.to_string(),
            ..Default::default()
        }
    }

    fn valuable(name: &str) -> ScoredMetric {
        score(MetricRecord {
            used_in_decision_making: true,
            visible_in_dashboard: true,
            last_reviewed: "1 week".to_string(),
            last_used_for_decision: "3 days".to_string(),
            notes: "drove retention decision".to_string(),
            ..record(name)
        })
    }

    fn vanity(name: &str, visible: bool) -> ScoredMetric {
        score(MetricRecord {
            visible_in_dashboard: visible,
            executive_requested: true,
            last_reviewed: "8 months".to_string(),
            last_used_for_decision: "never".to_string(),
            notes: "looks good to execs".to_string(),
            ..record(name)
        })
    }

    fn neutral_stale(name: &str) -> ScoredMetric {
        // value 2 (recent use) vs vanity 2 (stale review): neutral zone
        score(MetricRecord {
            last_reviewed: "7 months".to_string(),
            last_used_for_decision: "1 week".to_string(),
            ..record(name)
        })
    }

    #[test]
    fn ranking_is_value_desc_then_recency_then_name() {
        let mut metrics = vec![
            score(MetricRecord {
                used_in_decision_making: true,
                last_used_for_decision: "9 months".to_string(),
                ..record("B Stale Use")
            }),
            score(MetricRecord {
                used_in_decision_making: true,
                last_used_for_decision: "2 days".to_string(),
                ..record("Fresh Use")
            }),
            valuable("Top Value"),
        ];
        rank_metrics(&mut metrics);

        assert_eq!(metrics[0].record.metric_name, "Top Value");
        // equal value (3+2 vs 3+2)? no: "Fresh Use" has recent use (+2) so 5;
        // "B Stale Use" has 3. Order follows score, then name is untouched.
        assert_eq!(metrics[1].record.metric_name, "Fresh Use");
        assert_eq!(metrics[2].record.metric_name, "B Stale Use");
    }

    #[test]
    fn rank_ties_break_on_name() {
        let mut metrics = vec![
            score(record("Zeta")),
            score(record("Alpha")),
            score(record("Midway")),
        ];
        rank_metrics(&mut metrics);
        let names: Vec<&str> = metrics.iter().map(|m| m.record.metric_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Midway", "Zeta"]);
    }

    #[test]
    fn top_recommendations_exclude_vanity_and_never_pad() {
        let report = build_department_report(
            "Sales".to_string(),
            vec![
                vanity("Ornament 1", true),
                valuable("Keeper"),
                vanity("Ornament 2", true),
            ],
            DEFAULT_TOP_N,
        );

        assert_eq!(report.top_recommendations.len(), 1);
        assert_eq!(report.top_recommendations[0].metric_name, "Keeper");
    }

    #[test]
    fn removal_candidates_require_dashboard_visibility() {
        let report = build_department_report(
            "Sales".to_string(),
            vec![vanity("On Dashboard", true), vanity("Off Dashboard", false)],
            DEFAULT_TOP_N,
        );

        assert_eq!(report.removal_candidates.len(), 1);
        assert_eq!(report.removal_candidates[0].metric_name, "On Dashboard");
    }

    #[test]
    fn reduction_ratio_is_zero_without_dashboard_metrics() {
        let report = build_department_report(
            "Ops".to_string(),
            vec![vanity("Hidden", false)],
            DEFAULT_TOP_N,
        );
        assert_eq!(report.dashboard_total, 0);
        assert_eq!(report.potential_dashboard_reduction, 0.0);
    }

    #[test]
    fn reduction_ratio_counts_only_visible_metrics() {
        let report = build_department_report(
            "Sales".to_string(),
            vec![
                vanity("Retire Me", true),
                valuable("Keeper"),
                score(MetricRecord {
                    visible_in_dashboard: true,
                    used_in_decision_making: true,
                    last_reviewed: "1 week".to_string(),
                    last_used_for_decision: "2 days".to_string(),
                    ..record("Solid")
                }),
            ],
            DEFAULT_TOP_N,
        );

        assert_eq!(report.dashboard_total, 3);
        assert!((report.potential_dashboard_reduction - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn review_list_flags_neutral_stale_metrics() {
        let report = build_department_report(
            "Sales".to_string(),
            vec![neutral_stale("Borderline"), valuable("Keeper")],
            DEFAULT_TOP_N,
        );
        assert_eq!(report.review_list, vec!["Borderline".to_string()]);
    }

    #[test]
    fn ranked_metrics_contains_everything_once() {
        let report = build_department_report(
            "Sales".to_string(),
            vec![vanity("A", true), valuable("B"), neutral_stale("C")],
            DEFAULT_TOP_N,
        );
        assert_eq!(report.ranked_metrics.len(), 3);
        let mut names: Vec<&str> = report
            .ranked_metrics
            .iter()
            .map(|m| m.record.metric_name.as_str())
            .collect();
        names.sort_unstable();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn justification_picks_dominant_contributors() {
        let reasons = vec![
            Contribution::new("small", 1),
            Contribution::new("large", 5),
            Contribution::new("medium", 2),
        ];
        // 5 of 8 already crosses 50%
        assert_eq!(dominant_reasons(&reasons), "large");
    }

    #[test]
    fn justification_accumulates_until_half() {
        let reasons = vec![
            Contribution::new("a", 2),
            Contribution::new("b", 2),
            Contribution::new("c", 2),
        ];
        // equal weights keep insertion order; 2+2 of 6 crosses half
        assert_eq!(dominant_reasons(&reasons), "a; b");
    }

    #[test]
    fn justification_of_empty_reasons_is_stable() {
        assert_eq!(dominant_reasons(&[]), "no strong signals");
    }

    #[test]
    fn keeper_justification_reads_from_value_reasons() {
        let report = build_department_report(
            "Sales".to_string(),
            vec![valuable("Keeper")],
            DEFAULT_TOP_N,
        );
        let justification = &report.top_recommendations[0].justification;
        assert!(
            justification.contains("actively used in decisions"),
            "got: {justification}"
        );
    }

    #[test]
    fn removal_justification_reads_from_vanity_reasons() {
        let report = build_department_report(
            "Sales".to_string(),
            vec![vanity("Ornament", true)],
            DEFAULT_TOP_N,
        );
        let justification = &report.removal_candidates[0].justification;
        assert!(
            justification.contains("not used in decisions"),
            "got: {justification}"
        );
    }
}
