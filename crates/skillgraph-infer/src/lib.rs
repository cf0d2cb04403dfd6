//! Skill inference over a [`skillgraph_core::hierarchy::HierarchyGraph`].
//!
//! Detects skills mentioned directly in text (explicit), follows implication
//! edges to derive the rest (implicit), and scores coverage of a requirement set.

pub mod closure;
pub mod engine;
pub mod matching;
pub mod score;

pub use engine::{InferenceEngine, InferenceResult};
