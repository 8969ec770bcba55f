//! 設定ファイルのテスト

use puzzle_tools::config::{Config, DEFAULT_BASE_URL};
use puzzle_tools::error::ToolError;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.board.max_results, 1000);
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_base_url("https://puzzles.example.com/".into()).unwrap();
    config.board.max_results = 50;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.base_url, "https://puzzles.example.com");
    assert_eq!(loaded.board.max_results, 50);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"board": {"exifMaxResults": 200}}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout_seconds, 30);
    assert_eq!(config.board.exif_max_results, Some(200));
}

#[test]
fn test_rejects_non_http_url() {
    let mut config = Config::default();
    let result = config.set_base_url("ftp://example.com".into());
    assert!(matches!(result, Err(ToolError::Config(_))));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_env_override_is_validated() {
    let mut config = Config::default();
    let result = config.apply_env_override(Some("localhost:9000".into()));
    assert!(matches!(result, Err(ToolError::Config(_))));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);

    config.apply_env_override(Some("http://127.0.0.1:9000/".into())).unwrap();
    assert_eq!(config.base_url, "http://127.0.0.1:9000");

    config.apply_env_override(Some("  ".into())).unwrap();
    config.apply_env_override(None).unwrap();
    assert_eq!(config.base_url, "http://127.0.0.1:9000");
}
