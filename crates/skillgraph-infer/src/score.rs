//! Requirement coverage scoring.
//!
//! Both sides are normalized here with [`normalize_skill`], so callers may pass
//! raw requirement strings. Entries that are blank after normalization are ignored.

use serde::Serialize;
use skillgraph_core::hierarchy::{Skill, normalize_skill};
use std::collections::BTreeSet;

/// Coverage breakdown of a requirement set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Percentage of requirements covered, in `[0, 100]`, two decimals.
    pub score: f64,
    pub matched: BTreeSet<Skill>,
    pub missing: BTreeSet<Skill>,
}

/// Percentage of `required` skills present in `candidate`, rounded to two decimals.
///
/// An empty requirement set scores `0.0`. That means "nothing to satisfy", not an
/// error and not a perfect match.
pub fn score<C, R>(candidate: C, required: R) -> f64
where
    C: IntoIterator,
    C::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    score_report(candidate, required).score
}

/// Like [`score`], but also lists which requirements matched and which are missing.
pub fn score_report<C, R>(candidate: C, required: R) -> ScoreReport
where
    C: IntoIterator,
    C::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    let candidate = normalized_set(candidate);
    let (matched, missing): (BTreeSet<Skill>, BTreeSet<Skill>) = normalized_set(required)
        .into_iter()
        .partition(|skill| candidate.contains(skill));

    let total = matched.len() + missing.len();
    let score = if total == 0 {
        0.0
    } else {
        round2(100.0 * matched.len() as f64 / total as f64)
    };

    ScoreReport {
        score,
        matched,
        missing,
    }
}

fn normalized_set<I>(skills: I) -> BTreeSet<Skill>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| normalize_skill(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_coverage() {
        assert_eq!(score(["python", "react"], ["python", "go"]), 50.0);
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        assert_eq!(score(["python", "react"], Vec::<String>::new()), 0.0);
        assert_eq!(score(Vec::<String>::new(), Vec::<String>::new()), 0.0);
        // Blank-only requirements are treated as empty
        assert_eq!(score(["python"], ["  ", ""]), 0.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        assert_eq!(score(["a"], ["a", "b", "c"]), 33.33);
        assert_eq!(score(["a", "b"], ["a", "b", "c"]), 66.67);
    }

    #[test]
    fn test_full_and_no_coverage() {
        assert_eq!(score(["docker", "cloud"], ["docker"]), 100.0);
        assert_eq!(score(Vec::<String>::new(), ["docker"]), 0.0);
    }

    #[test]
    fn test_normalizes_both_sides() {
        assert_eq!(score([" Python "], ["PYTHON", "Go"]), 50.0);
        // Duplicates after normalization count once
        assert_eq!(score(["python"], ["Python", "python", "go"]), 50.0);
    }

    #[test]
    fn test_report_lists_matched_and_missing() {
        let report = score_report(
            ["python", "fastapi", "react"],
            ["Python", "FastAPI", "TensorFlow", "Cloud"],
        );
        assert_eq!(report.score, 50.0);
        assert_eq!(
            report.matched.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["fastapi", "python"]
        );
        assert_eq!(
            report.missing.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["cloud", "tensorflow"]
        );
    }
}
