//! The skill implication graph.
//!
//! Each node is a normalized skill name; an edge `A -> B` means "A implies B".
//! The graph is built once from a [`HierarchyDefinition`] and is read-only afterwards.

use crate::definition::HierarchyDefinition;
use std::collections::{BTreeMap, BTreeSet, HashMap, btree_set};

/// A normalized (trimmed, lowercase) skill name.
pub type Skill = String;

static NO_SKILLS: BTreeSet<Skill> = BTreeSet::new();

/// Normalize a raw skill name: trim surrounding whitespace and lowercase.
pub fn normalize_skill(raw: &str) -> Skill {
    raw.trim().to_lowercase()
}

/// Immutable, case-normalized directed graph of skill implications.
///
/// Cycles and self-loops are allowed, and the graph need not be connected.
/// `all_skills` is derived from `edges` during [`HierarchyGraph::build`] and is
/// never modified on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyGraph {
    /// Adjacency list: skill -> skills it directly implies.
    edges: BTreeMap<Skill, BTreeSet<Skill>>,
    /// Every key and every implied skill in `edges`.
    all_skills: BTreeSet<Skill>,
}

impl HierarchyGraph {
    /// The graph with no skills. Inference over it always yields empty results.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a graph from a definition, normalizing every name.
    ///
    /// Keys that normalize to the same skill (e.g. "Python" and "python ") have
    /// their implied skills unioned, so the result does not depend on key order.
    pub fn build(definition: &HierarchyDefinition) -> Self {
        let mut edges: BTreeMap<Skill, BTreeSet<Skill>> = BTreeMap::new();
        for (key, implied) in definition.iter() {
            edges
                .entry(normalize_skill(key))
                .or_default()
                .extend(implied.iter().map(|s| normalize_skill(s)));
        }

        let mut all_skills: BTreeSet<Skill> = edges.keys().cloned().collect();
        for targets in edges.values() {
            all_skills.extend(targets.iter().cloned());
        }

        let graph = Self { edges, all_skills };
        tracing::debug!(
            skills = graph.skill_count(),
            edges = graph.edge_count(),
            "built skill hierarchy"
        );
        graph
    }

    /// The universe of skills that can be detected or inferred.
    pub fn all_skills(&self) -> &BTreeSet<Skill> {
        &self.all_skills
    }

    /// Skills directly implied by `skill`. Empty for skills with no outgoing edges
    /// and for skills not in the graph.
    pub fn implied_by(&self, skill: &str) -> &BTreeSet<Skill> {
        self.edges.get(skill).unwrap_or(&NO_SKILLS)
    }

    /// Iterate the adjacency list in skill order.
    pub fn edges(&self) -> impl Iterator<Item = (&Skill, &BTreeSet<Skill>)> {
        self.edges.iter()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.all_skills.contains(skill)
    }

    pub fn skill_count(&self) -> usize {
        self.all_skills.len()
    }

    /// Number of distinct `A -> B` implications.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.all_skills.is_empty()
    }

    /// Skills that list themselves as implied.
    pub fn self_loops(&self) -> Vec<&Skill> {
        self.edges
            .iter()
            .filter(|(skill, targets)| targets.contains(*skill))
            .map(|(skill, _)| skill)
            .collect()
    }

    /// Whether any implication chain leads back to where it started.
    /// A self-loop counts as a cycle.
    pub fn has_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            OnStack,
            Done,
        }

        let mut marks: HashMap<&str, Mark> = HashMap::new();
        for start in self.edges.keys() {
            if marks.contains_key(start.as_str()) {
                continue;
            }
            marks.insert(start, Mark::OnStack);
            let mut stack: Vec<(&str, btree_set::Iter<'_, Skill>)> =
                vec![(start.as_str(), self.implied_by(start).iter())];

            while let Some(frame) = stack.last_mut() {
                match frame.1.next() {
                    Some(next) => match marks.get(next.as_str()) {
                        Some(Mark::OnStack) => return true,
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(next, Mark::OnStack);
                            stack.push((next.as_str(), self.implied_by(next).iter()));
                        }
                    },
                    None => {
                        let node = frame.0;
                        marks.insert(node, Mark::Done);
                        stack.pop();
                    }
                }
            }
        }
        false
    }

    /// The normalized definition this graph represents (merged keys, lowercase names).
    pub fn to_definition(&self) -> HierarchyDefinition {
        HierarchyDefinition::from_normalized(
            self.edges
                .iter()
                .map(|(skill, targets)| (skill.clone(), targets.iter().cloned().collect()))
                .collect(),
        )
    }
}
