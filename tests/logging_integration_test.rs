//! Integration tests for logging functionality
//!
//! Only one test per binary may install the global subscriber; the others
//! fail before reaching that point.

use reqflow::config::LoggingConfig;
use reqflow::logging::init_logging;
use reqflow::logging::structured::LOG_FILE_NAME;
use tempfile::TempDir;

fn file_logging(path: &std::path::Path) -> LoggingConfig {
    LoggingConfig {
        local_enabled: true,
        local_path: path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    }
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let result = init_logging("loud", &file_logging(&log_path));
    assert!(result.is_err());
    assert!(!log_path.exists());
}

#[test]
fn test_unwritable_log_directory_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, "occupied").unwrap();

    let result = init_logging("info", &file_logging(&blocker.join("logs")));
    let err = result.err().unwrap();
    assert!(err.to_string().contains("Failed to create log directory"));
}

#[test]
fn test_file_logging_creates_directory_and_writes_json() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("nested").join("logs");

    let guard = init_logging("info", &file_logging(&log_path)).unwrap();
    drop(guard);

    assert!(log_path.is_dir());
    let contents = std::fs::read_to_string(log_path.join(LOG_FILE_NAME)).unwrap();
    let entry: serde_json::Value = contents
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .find(|entry: &serde_json::Value| entry["fields"]["message"] == "Logging initialized")
        .unwrap();
    assert_eq!(entry["fields"]["local_enabled"], true);
    assert_eq!(entry["level"], "INFO");
}
