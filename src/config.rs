//! Configuration management for nbheader
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{NbheaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for nbheader
///
/// This structure holds all configuration needed by the extension core:
/// the placeholder values written into new header cells and the lifecycle
/// timing/filtering knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Header content configuration (placeholders, cell languages)
    #[serde(default)]
    pub header: HeaderConfig,

    /// Document lifecycle configuration (filters, settle delays)
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

/// Header content configuration
///
/// Values in this section end up verbatim inside newly inserted header
/// cells, so they are freeform text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Author name written into the `Author:` line
    #[serde(default = "default_author")]
    pub author: String,

    /// Placeholder written into the `Category:` line
    #[serde(default = "default_category")]
    pub category: String,

    /// Placeholder tags written into the `Tags:` line
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,

    /// Language id of the header cell itself; header detection keys on this
    #[serde(default = "default_cell_language")]
    pub cell_language: String,

    /// Language id for the blank code cell added to empty documents
    #[serde(default = "default_primary_language")]
    pub primary_language: String,
}

fn default_author() -> String {
    "Add Author here".to_string()
}

fn default_category() -> String {
    "Add Category here".to_string()
}

fn default_tags() -> Vec<String> {
    vec!["tag1".to_string(), "tag2".to_string()]
}

fn default_cell_language() -> String {
    "raw".to_string()
}

fn default_primary_language() -> String {
    "python".to_string()
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
            category: default_category(),
            tags: default_tags(),
            cell_language: default_cell_language(),
            primary_language: default_primary_language(),
        }
    }
}

/// Document lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Notebook type the extension reacts to; other documents are ignored
    #[serde(default = "default_notebook_type")]
    pub notebook_type: String,

    /// Delay after a document opens before the header check runs, giving the
    /// host time to finish populating the initial cell list (milliseconds)
    #[serde(default = "default_open_delay_ms")]
    pub open_delay_ms: u64,

    /// Delay after a Last-Modified edit before the re-save is requested,
    /// letting the edit settle in the host (milliseconds)
    #[serde(default = "default_resave_delay_ms")]
    pub resave_delay_ms: u64,
}

fn default_notebook_type() -> String {
    "jupyter-notebook".to_string()
}

fn default_open_delay_ms() -> u64 {
    100
}

fn default_resave_delay_ms() -> u64 {
    100
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            notebook_type: default_notebook_type(),
            open_delay_ms: default_open_delay_ms(),
            resave_delay_ms: default_resave_delay_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header: HeaderConfig::default(),
            lifecycle: LifecycleConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed CLI arguments whose overrides take precedence
    ///
    /// # Returns
    ///
    /// Returns the effective configuration. A missing file is not an error;
    /// defaults are used and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns `NbheaderError::Config` if the file exists but cannot be read
    /// or parsed.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| NbheaderError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| NbheaderError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(author) = std::env::var("NBHEADER_AUTHOR") {
            self.header.author = author;
        }

        if let Ok(category) = std::env::var("NBHEADER_CATEGORY") {
            self.header.category = category;
        }

        if let Ok(language) = std::env::var("NBHEADER_PRIMARY_LANGUAGE") {
            self.header.primary_language = language;
        }

        if let Ok(notebook_type) = std::env::var("NBHEADER_NOTEBOOK_TYPE") {
            self.lifecycle.notebook_type = notebook_type;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(author) = &cli.author {
            self.header.author = author.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `NbheaderError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.header.author.is_empty() {
            return Err(NbheaderError::Config("author cannot be empty".to_string()).into());
        }

        if self.header.cell_language.is_empty() {
            return Err(NbheaderError::Config("cell_language cannot be empty".to_string()).into());
        }

        if self.header.primary_language.is_empty() {
            return Err(
                NbheaderError::Config("primary_language cannot be empty".to_string()).into(),
            );
        }

        if self.lifecycle.notebook_type.is_empty() {
            return Err(NbheaderError::Config("notebook_type cannot be empty".to_string()).into());
        }

        if self.lifecycle.open_delay_ms > 10_000 {
            return Err(NbheaderError::Config(
                "open_delay_ms must be at most 10000".to_string(),
            )
            .into());
        }

        if self.lifecycle.resave_delay_ms > 10_000 {
            return Err(NbheaderError::Config(
                "resave_delay_ms must be at most 10000".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_file, temp_dir};
    use serial_test::serial;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.header.cell_language, "raw");
        assert_eq!(config.header.primary_language, "python");
        assert_eq!(config.lifecycle.notebook_type, "jupyter-notebook");
        assert_eq!(config.lifecycle.open_delay_ms, 100);
        assert_eq!(config.lifecycle.resave_delay_ms, 100);
    }

    #[test]
    fn test_default_placeholders() {
        let config = Config::default();
        assert_eq!(config.header.category, "Add Category here");
        assert_eq!(config.header.tags, vec!["tag1", "tag2"]);
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        let cli = crate::cli::Cli::default();
        let config = Config::load("/nonexistent/config.yaml", &cli).unwrap();
        assert_eq!(config.header.cell_language, "raw");
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let dir = temp_dir();
        let path = create_test_file(
            &dir,
            "config.yaml",
            r#"
header:
  author: Jane Doe
  primary_language: rust
lifecycle:
  open_delay_ms: 0
"#,
        );

        let cli = crate::cli::Cli::default();
        let config = Config::load(path.to_str().unwrap(), &cli).unwrap();
        assert_eq!(config.header.author, "Jane Doe");
        assert_eq!(config.header.primary_language, "rust");
        assert_eq!(config.lifecycle.open_delay_ms, 0);
        // Unspecified fields keep their defaults
        assert_eq!(config.lifecycle.resave_delay_ms, 100);
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "config.yaml", "header: [not a map");
        let cli = crate::cli::Cli::default();
        assert!(Config::load(path.to_str().unwrap(), &cli).is_err());
    }

    #[test]
    #[serial]
    fn test_cli_author_override() {
        let cli = crate::cli::Cli {
            author: Some("Override Author".to_string()),
            ..crate::cli::Cli::default()
        };
        let config = Config::load("/nonexistent/config.yaml", &cli).unwrap();
        assert_eq!(config.header.author, "Override Author");
    }

    #[test]
    #[serial]
    fn test_env_overrides_beat_file_values() {
        let dir = temp_dir();
        let path = create_test_file(
            &dir,
            "config.yaml",
            r#"
header:
  author: File Author
lifecycle:
  notebook_type: file-notebook
"#,
        );

        std::env::set_var("NBHEADER_AUTHOR", "Env Author");
        std::env::set_var("NBHEADER_NOTEBOOK_TYPE", "env-notebook");

        let cli = crate::cli::Cli::default();
        let config = Config::load(path.to_str().unwrap(), &cli);

        std::env::remove_var("NBHEADER_AUTHOR");
        std::env::remove_var("NBHEADER_NOTEBOOK_TYPE");

        let config = config.unwrap();
        assert_eq!(config.header.author, "Env Author");
        assert_eq!(config.lifecycle.notebook_type, "env-notebook");
    }

    #[test]
    #[serial]
    fn test_env_category_and_language_overrides() {
        std::env::set_var("NBHEADER_CATEGORY", "Essays");
        std::env::set_var("NBHEADER_PRIMARY_LANGUAGE", "julia");

        let cli = crate::cli::Cli::default();
        let config = Config::load("/nonexistent/config.yaml", &cli);

        std::env::remove_var("NBHEADER_CATEGORY");
        std::env::remove_var("NBHEADER_PRIMARY_LANGUAGE");

        let config = config.unwrap();
        assert_eq!(config.header.category, "Essays");
        assert_eq!(config.header.primary_language, "julia");
    }

    #[test]
    fn test_validate_rejects_empty_author() {
        let mut config = Config::default();
        config.header.author = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_notebook_type() {
        let mut config = Config::default();
        config.lifecycle.notebook_type = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_excessive_delay() {
        let mut config = Config::default();
        config.lifecycle.open_delay_ms = 60_000;
        assert!(config.validate().is_err());
    }
}
