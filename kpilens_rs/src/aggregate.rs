//! Grouping of scored metrics by department.
//!
//! Case-sensitive exact match on the department string. Output order is the
//! order of first appearance in the input (traceable back to the source
//! rows); callers wanting alphabetical order sort post-hoc. Departments with
//! zero metrics never appear.

use std::collections::HashMap;

use crate::types::ScoredMetric;

pub fn group_by_department(scored: Vec<ScoredMetric>) -> Vec<(String, Vec<ScoredMetric>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<ScoredMetric>> = HashMap::new();

    for metric in scored {
        let department = metric.record.department.clone();
        if !groups.contains_key(&department) {
            order.push(department.clone());
        }
        groups.entry(department).or_default().push(metric);
    }

    order
        .into_iter()
        .map(|department| {
            let metrics = groups.remove(&department).unwrap_or_default();
            (department, metrics)
        })
        .collect()
}
