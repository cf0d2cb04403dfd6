//! Forward reachability over implication edges.

use skillgraph_core::hierarchy::{HierarchyGraph, Skill};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Every skill reachable from `seeds` by following one or more implication edges,
/// excluding the seeds themselves.
///
/// Breadth-first with a visited set, so each skill is expanded at most once and
/// cycles or self-loops terminate.
pub fn forward_closure(graph: &HierarchyGraph, seeds: &BTreeSet<Skill>) -> BTreeSet<Skill> {
    let mut visited: HashSet<&str> = seeds.iter().map(String::as_str).collect();
    let mut queue: VecDeque<&str> = seeds.iter().map(String::as_str).collect();
    let mut reached = BTreeSet::new();

    while let Some(current) = queue.pop_front() {
        for next in graph.implied_by(current) {
            if visited.insert(next.as_str()) {
                reached.insert(next.clone());
                queue.push_back(next.as_str());
            }
        }
    }

    reached
}
