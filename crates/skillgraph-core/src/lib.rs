//! Core types for skillgraph.
//!
//! Provides the skill implication graph ([`hierarchy::HierarchyGraph`]), parsing and
//! validation of hierarchy definitions, JSON file loading that degrades to an empty
//! graph, and project configuration.

pub mod config;
pub mod definition;
pub mod hierarchy;
pub mod storage;
