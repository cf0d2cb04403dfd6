//! Hierarchy definitions: the raw `skill -> [implied skills]` mapping a graph is built from.
//!
//! Definitions are validated on construction. Anything that is not an object of
//! string arrays, or that contains a blank skill name, is rejected with a
//! [`DefinitionError::Invalid`] naming the offending entry. Nothing is coerced.

use crate::hierarchy::normalize_skill;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Errors raised while loading or validating a hierarchy definition.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("skill hierarchy not found at {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("skill hierarchy is not valid JSON: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid skill hierarchy: {0}")]
    Invalid(String),
    #[error("failed to access skill hierarchy at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A validated hierarchy definition, exactly as supplied (not yet normalized).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HierarchyDefinition {
    entries: BTreeMap<String, Vec<String>>,
}

impl HierarchyDefinition {
    /// Parse a definition from a JSON object of string arrays.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let value: Value =
            serde_json::from_str(json).map_err(|source| DefinitionError::Malformed { source })?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DefinitionError> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(DefinitionError::Invalid(format!(
                    "expected an object mapping skills to implied skills, found {}",
                    json_kind(&other)
                )));
            }
        };

        let mut entries = BTreeMap::new();
        for (key, implied) in object {
            check_name(&key, || "found a blank skill name as a key".to_string())?;
            let items = match implied {
                Value::Array(items) => items,
                other => {
                    return Err(DefinitionError::Invalid(format!(
                        "implied skills for '{}' must be an array of strings, found {}",
                        key,
                        json_kind(&other)
                    )));
                }
            };

            let mut skills = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                match item {
                    Value::String(skill) => {
                        check_name(&skill, || {
                            format!("implied skill #{} of '{}' is blank", i, key)
                        })?;
                        skills.push(skill);
                    }
                    other => {
                        return Err(DefinitionError::Invalid(format!(
                            "implied skill #{} of '{}' must be a string, found {}",
                            i,
                            key,
                            json_kind(&other)
                        )));
                    }
                }
            }
            entries.insert(key, skills);
        }

        Ok(Self { entries })
    }

    /// Validate an in-memory mapping.
    pub fn from_map(entries: BTreeMap<String, Vec<String>>) -> Result<Self, DefinitionError> {
        for (key, implied) in &entries {
            check_name(key, || "found a blank skill name as a key".to_string())?;
            for (i, skill) in implied.iter().enumerate() {
                check_name(skill, || format!("implied skill #{} of '{}' is blank", i, key))?;
            }
        }
        Ok(Self { entries })
    }

    /// Entries already produced by normalization, which cannot contain blank names.
    pub(crate) fn from_normalized(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Serialize to a pretty-printed JSON object.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries)
            .context("failed to serialize skill hierarchy to JSON")
    }

    /// Number of keys that collapse onto an earlier key once normalized
    /// (e.g. "Python" and "python "). Their implications are merged by the graph.
    pub fn merged_key_count(&self) -> usize {
        let distinct: BTreeSet<String> =
            self.entries.keys().map(|k| normalize_skill(k)).collect();
        self.entries.len() - distinct.len()
    }

    pub fn entries(&self) -> &BTreeMap<String, Vec<String>> {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_name(name: &str, describe: impl FnOnce() -> String) -> Result<(), DefinitionError> {
    if name.trim().is_empty() {
        return Err(DefinitionError::Invalid(describe()));
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
