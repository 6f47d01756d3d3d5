use crate::conf::{ConfigError, discover};

use std::fs;
use tempfile::tempdir;

#[test]
fn discover_finds_matching_files() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.log"), "").unwrap();
    fs::write(root.join("b.log"), "").unwrap();
    fs::write(root.join("c.txt"), "").unwrap();

    // Act
    let result = discover(root, "*.log").unwrap();

    // Assert
    assert_eq!(result, vec![root.join("a.log"), root.join("b.log")]);
}

#[test]
fn discover_returns_sorted_paths() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("z.log"), "").unwrap();
    fs::write(root.join("a.log"), "").unwrap();
    fs::write(root.join("m.log"), "").unwrap();

    // Act
    let result = discover(root, "*.log").unwrap();

    // Assert
    assert_eq!(
        result,
        vec![root.join("a.log"), root.join("m.log"), root.join("z.log")]
    );
}

#[test]
fn discover_skips_directories() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::create_dir(root.join("archive.log")).unwrap();
    fs::write(root.join("live.log"), "").unwrap();

    let result = discover(root, "*.log").unwrap();

    assert_eq!(result, vec![root.join("live.log")]);
}

#[test]
fn discover_returns_empty_when_nothing_matches() {
    let dir = tempdir().unwrap();

    let result = discover(dir.path(), "*.log").unwrap();

    assert!(result.is_empty());
}

#[test]
fn discover_rejects_invalid_patterns() {
    let dir = tempdir().unwrap();

    let err = discover(dir.path(), "[").unwrap_err();

    assert!(matches!(err, ConfigError::Glob { .. }));
}
