use skillgraph_core::definition::{DefinitionError, HierarchyDefinition};
use skillgraph_core::storage;
use tempfile::TempDir;

fn write(tmp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_graph_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = write(
        &tmp,
        "skills.json",
        r#"{"Django": ["Python", "Web Development"], "python": ["programming"]}"#,
    );

    let graph = storage::load_graph(&path).unwrap();
    assert_eq!(graph.skill_count(), 4);
    assert!(graph.implied_by("django").contains("web development"));
}

#[test]
fn test_missing_file_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = storage::load_graph(&tmp.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, DefinitionError::NotFound { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_missing_file_degrades_to_empty() {
    let tmp = TempDir::new().unwrap();
    let outcome = storage::load_graph_or_empty(&tmp.path().join("missing.json"));
    assert!(outcome.is_degraded());
    assert!(outcome.graph.is_empty());
    assert!(matches!(
        outcome.error,
        Some(DefinitionError::NotFound { .. })
    ));
}

#[test]
fn test_malformed_file_degrades_to_empty() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "bad.json", "{ not json");
    let outcome = storage::load_graph_or_empty(&path);
    assert!(outcome.graph.is_empty());
    assert!(matches!(
        outcome.error,
        Some(DefinitionError::Malformed { .. })
    ));
}

#[test]
fn test_wrong_shape_degrades_with_validation_error() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "shape.json", r#"{"react": [true]}"#);
    let outcome = storage::load_graph_or_empty(&path);
    assert!(outcome.graph.is_empty());
    assert!(matches!(outcome.error, Some(DefinitionError::Invalid(_))));
}

#[test]
fn test_directory_path_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = storage::load_definition(tmp.path()).unwrap_err();
    assert!(matches!(err, DefinitionError::Io { .. }));
}

#[test]
fn test_valid_file_is_not_degraded() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "ok.json", r#"{"go": ["backend"]}"#);
    let outcome = storage::load_graph_or_empty(&path);
    assert!(!outcome.is_degraded());
    assert_eq!(outcome.graph.skill_count(), 2);
}

#[test]
fn test_save_and_load_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("dir").join("skills.json");
    let def = HierarchyDefinition::from_json(r#"{"kubernetes": ["docker", "devops"]}"#).unwrap();

    storage::save_definition(&path, &def).unwrap();
    assert!(path.exists());

    let loaded = storage::load_definition(&path).unwrap();
    assert_eq!(loaded, def);
}
