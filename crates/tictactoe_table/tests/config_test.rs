//! Tests for loading table configs from disk.

use std::fs;
use tempfile::TempDir;

use tictactoe_table::{Seat, TableConfig};

/// Writes `content` to `table.toml` inside `dir`.
fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("table.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_from_file_reads_all_fields() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"name_first = "Ada"
name_second = "Bob"
mark_first = "A"
mark_second = "B"
mark_empty = "."
log_filter = "tictactoe_engine=debug"
"#,
    );

    let config = TableConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.name_of(Seat::X), "Ada");
    assert_eq!(config.name_of(Seat::O), "Bob");
    assert_eq!(config.mark_of(Seat::X), 'A');
    assert_eq!(config.mark_of(Seat::O), 'B');
    assert_eq!(*config.mark_empty(), '.');
    assert_eq!(config.log_filter(), "tictactoe_engine=debug");
}

#[test]
fn test_from_file_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = TableConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_from_file_invalid_toml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "this is not valid toml !!!@@@");
    let err = TableConfig::from_file(&path).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_from_file_rejects_multi_character_mark() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "mark_first = \"XX\"\n");
    assert!(TableConfig::from_file(&path).is_err());
}

#[test]
fn test_from_file_rejects_clashing_marks() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "mark_empty = \"O\"\n");
    let err = TableConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("distinct"));
}
