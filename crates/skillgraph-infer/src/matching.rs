//! Explicit skill detection.
//!
//! Matching is plain substring search over the lowercased text. It is not
//! word-boundary aware: "go" is found inside "mango" and "java" inside
//! "javascript". Callers rely on this looser match, so switching to token or
//! boundary matching would change detection results.

use skillgraph_core::hierarchy::{HierarchyGraph, Skill};
use std::collections::BTreeSet;

/// Skills from the graph's universe that occur verbatim in `text` (case-insensitive).
pub fn explicit_skills(graph: &HierarchyGraph, text: &str) -> BTreeSet<Skill> {
    if graph.is_empty() || text.is_empty() {
        return BTreeSet::new();
    }
    let haystack = text.to_lowercase();
    graph
        .all_skills()
        .iter()
        .filter(|skill| haystack.contains(skill.as_str()))
        .cloned()
        .collect()
}
