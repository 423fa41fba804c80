use std::collections::HashSet;

use crate::models::{ProjectRecord, RawRecord};
use crate::search::normalize::normalize;

/// Normalize, deduplicate and rank raw upstream records.
pub fn process(records: &[RawRecord]) -> Vec<ProjectRecord> {
    let projects = records.iter().map(normalize).collect();
    rank(dedupe(projects))
}

/// Drop records whose id was already seen. First occurrence wins.
pub fn dedupe(projects: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
    let mut seen = HashSet::with_capacity(projects.len());
    projects
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

/// Sort by stars descending. The sort is stable, so ties keep the
/// upstream's own order.
pub fn rank(mut projects: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
    projects.sort_by(|a, b| b.stars.cmp(&a.stars));
    projects
}
