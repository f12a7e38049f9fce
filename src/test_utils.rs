//! Test utilities for nbheader
//!
//! This module provides common test utilities including temporary directory
//! management, test file creation, and configuration fixtures.

use crate::config::Config;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Arguments
///
/// * `dir` - Directory to create the file in
/// * `name` - Name of the file
/// * `content` - Content to write to the file
///
/// # Returns
///
/// Returns the path to the created file
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Create a test configuration with zeroed settle delays
///
/// # Returns
///
/// Returns a Config instance suitable for testing
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.lifecycle.open_delay_ms = 0;
    config.lifecycle.resave_delay_ms = 0;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_test_config_has_no_delays() {
        let config = test_config();
        assert_eq!(config.lifecycle.open_delay_ms, 0);
        assert_eq!(config.lifecycle.resave_delay_ms, 0);
        assert!(config.validate().is_ok());
    }
}
