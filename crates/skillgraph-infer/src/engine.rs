//! The inference engine: explicit matching followed by implication closure.

use crate::closure::forward_closure;
use crate::matching::explicit_skills;
use crate::score::{ScoreReport, score_report};
use rayon::prelude::*;
use serde::Serialize;
use skillgraph_core::config::ScoreBasis;
use skillgraph_core::hierarchy::{HierarchyGraph, Skill};
use std::collections::BTreeSet;

/// Skills inferred from one piece of text.
///
/// `explicit` and `implicit` are disjoint and `all` is their union. Sets are
/// ordered for deterministic iteration only; presentation is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InferenceResult {
    /// Skills whose name appears in the text.
    pub explicit: BTreeSet<Skill>,
    /// Skills implied (directly or transitively) by explicit ones, minus the explicit ones.
    pub implicit: BTreeSet<Skill>,
    pub all: BTreeSet<Skill>,
}

impl InferenceResult {
    fn from_parts(explicit: BTreeSet<Skill>, reached: BTreeSet<Skill>) -> Self {
        let implicit: BTreeSet<Skill> = reached.difference(&explicit).cloned().collect();
        let all = explicit.union(&implicit).cloned().collect();
        Self {
            explicit,
            implicit,
            all,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// The candidate set selected by `basis`.
    pub fn skills_for(&self, basis: ScoreBasis) -> &BTreeSet<Skill> {
        match basis {
            ScoreBasis::All => &self.all,
            ScoreBasis::Explicit => &self.explicit,
        }
    }

    /// Score this result against a requirement set.
    pub fn score_against<R>(&self, required: R, basis: ScoreBasis) -> ScoreReport
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        score_report(self.skills_for(basis), required)
    }
}

/// Infers skills from text against one immutable hierarchy.
///
/// Build one at startup and pass it to whatever handles requests. `infer` takes
/// `&self`, so a shared engine serves concurrent callers without locking.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    graph: HierarchyGraph,
}

impl InferenceEngine {
    pub fn new(graph: HierarchyGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &HierarchyGraph {
        &self.graph
    }

    /// Detect explicit skills in `text` and derive the implicit ones.
    pub fn infer(&self, text: &str) -> InferenceResult {
        let explicit = explicit_skills(&self.graph, text);
        if explicit.is_empty() {
            return InferenceResult::default();
        }
        let reached = forward_closure(&self.graph, &explicit);
        let result = InferenceResult::from_parts(explicit, reached);
        tracing::debug!(
            explicit = result.explicit.len(),
            implicit = result.implicit.len(),
            "inferred skills"
        );
        result
    }

    /// Run [`InferenceEngine::infer`] over many texts in parallel.
    /// Results are in the same order as `texts`.
    pub fn infer_many<T>(&self, texts: &[T]) -> Vec<InferenceResult>
    where
        T: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.infer(text.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillgraph_core::definition::HierarchyDefinition;

    fn engine(json: &str) -> InferenceEngine {
        InferenceEngine::new(HierarchyGraph::build(
            &HierarchyDefinition::from_json(json).unwrap(),
        ))
    }

    #[test]
    fn test_explicit_reached_indirectly_is_not_implicit() {
        let e = engine(r#"{"next.js": ["react"], "react": ["javascript"]}"#);
        let result = e.infer("Next.js and React apps");
        assert!(result.explicit.contains("react"));
        assert!(!result.implicit.contains("react"));
        assert_eq!(result.implicit.len(), 1);
        assert_eq!(result.all.len(), 3);
    }

    #[test]
    fn test_skills_for_basis() {
        let e = engine(r#"{"django": ["python"]}"#);
        let result = e.infer("django");
        assert_eq!(result.skills_for(ScoreBasis::Explicit).len(), 1);
        assert_eq!(result.skills_for(ScoreBasis::All).len(), 2);
    }

    #[test]
    fn test_score_against_uses_basis() {
        let e = engine(r#"{"django": ["python"]}"#);
        let result = e.infer("Built sites with Django");
        assert_eq!(
            result.score_against(["python"], ScoreBasis::All).score,
            100.0
        );
        assert_eq!(
            result.score_against(["python"], ScoreBasis::Explicit).score,
            0.0
        );
    }

    #[test]
    fn test_result_serializes_as_sets() {
        let e = engine(r#"{"rust": ["systems"]}"#);
        let value = serde_json::to_value(e.infer("rust")).unwrap();
        assert_eq!(value["explicit"], serde_json::json!(["rust"]));
        assert_eq!(value["implicit"], serde_json::json!(["systems"]));
        assert_eq!(value["all"], serde_json::json!(["rust", "systems"]));
    }
}
