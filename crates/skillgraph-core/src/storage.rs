//! Read/write skill hierarchy definition files.

use crate::definition::{DefinitionError, HierarchyDefinition};
use crate::hierarchy::HierarchyGraph;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Result of loading a graph at the process boundary.
///
/// `graph` is always usable. When loading failed it is the empty graph and
/// `error` says why.
#[derive(Debug)]
pub struct LoadOutcome {
    pub graph: HierarchyGraph,
    pub error: Option<DefinitionError>,
}

impl LoadOutcome {
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Load and validate a definition from a JSON file.
pub fn load_definition(path: &Path) -> Result<HierarchyDefinition, DefinitionError> {
    let json = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DefinitionError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    HierarchyDefinition::from_json(&json)
}

/// Load a definition file and build its graph.
pub fn load_graph(path: &Path) -> Result<HierarchyGraph, DefinitionError> {
    let definition = load_definition(path)?;
    Ok(HierarchyGraph::build(&definition))
}

/// Load a graph, falling back to the empty graph on any definition error.
///
/// Detecting nothing is preferred over refusing to run: the failure is logged
/// and handed back in [`LoadOutcome::error`] instead of being propagated.
pub fn load_graph_or_empty(path: &Path) -> LoadOutcome {
    match load_graph(path) {
        Ok(graph) => LoadOutcome { graph, error: None },
        Err(err) => {
            tracing::warn!("{}; continuing with an empty skill hierarchy", err);
            LoadOutcome {
                graph: HierarchyGraph::empty(),
                error: Some(err),
            }
        }
    }
}

/// Write a definition as pretty JSON, creating parent directories if needed.
pub fn save_definition(path: &Path, definition: &HierarchyDefinition) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    let json = definition.to_json()?;
    fs::write(path, json)
        .with_context(|| format!("failed to write skill hierarchy to {}", path.display()))?;
    Ok(())
}
