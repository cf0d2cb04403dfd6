//! Configuration for hierarchy loading, scoring, and output.
//!
//! Load order: `.skillgraph/config.toml` → environment variables → defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_DIR: &str = ".skillgraph";
const CONFIG_FILE: &str = "config.toml";

/// Top-level skillgraph configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    pub hierarchy: HierarchyConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

/// Where the skill hierarchy definition lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Path to the JSON definition. Relative paths resolve against the project root.
    pub path: PathBuf,
}

/// Requirement scoring configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Which inferred set is compared against the requirements.
    pub basis: ScoreBasis,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print JSON instead of plain lists.
    pub json: bool,
}

/// The candidate skill set used when scoring against requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    /// Explicit and implicit skills.
    #[default]
    All,
    /// Only skills mentioned directly in the text.
    Explicit,
}

impl FromStr for ScoreBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "explicit" => Ok(Self::Explicit),
            other => Err(format!(
                "unknown score basis '{}' (expected 'all' or 'explicit')",
                other
            )),
        }
    }
}

impl fmt::Display for ScoreBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Explicit => f.write_str("explicit"),
        }
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data").join("skill_hierarchy.json"),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
/// Values that fail to parse are ignored.
fn env_override<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    target: &mut T,
) {
    if let Some(v) = lookup(var)
        && let Ok(parsed) = v.parse()
    {
        *target = parsed;
    }
}

/// Get the path to the config file for a given project root.
pub fn config_file(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

impl SkillConfig {
    /// Load config from `.skillgraph/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::load_with_env(project_root, |var| std::env::var(var).ok())
    }

    /// Like [`SkillConfig::load`], reading overrides through `lookup` instead of
    /// the process environment.
    pub fn load_with_env(
        project_root: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config_path = config_file(project_root);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        env_override(&lookup, "SKILLGRAPH_HIERARCHY", &mut config.hierarchy.path);
        env_override(&lookup, "SKILLGRAPH_SCORE_BASIS", &mut config.scoring.basis);
        env_override(&lookup, "SKILLGRAPH_JSON", &mut config.output.json);

        if config.hierarchy.path.as_os_str().is_empty() {
            anyhow::bail!("hierarchy.path must not be empty");
        }

        Ok(config)
    }

    /// Absolute (or project-relative) location of the hierarchy definition.
    pub fn hierarchy_path(&self, project_root: &Path) -> PathBuf {
        if self.hierarchy.path.is_absolute() {
            self.hierarchy.path.clone()
        } else {
            project_root.join(&self.hierarchy.path)
        }
    }
}
