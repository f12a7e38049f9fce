//! Command-line interface definition for nbheader
//!
//! This module defines the CLI structure using clap's derive API. The
//! binary is a development harness for the extension core: it can preview
//! the header synthesized for a file name and replay lifecycle scenarios
//! against an in-memory host.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nbheader - automatic metadata headers for notebook documents
///
/// Preview synthesized headers and replay document lifecycle scenarios
/// against the extension core.
#[derive(Parser, Debug, Clone)]
#[command(name = "nbheader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the author written into header cells
    #[arg(long)]
    pub author: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for nbheader
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the header cell that would be synthesized for a file
    Preview {
        /// Notebook file name (only the name is used; the file need not exist)
        file: String,
    },

    /// Replay a lifecycle scenario against an in-memory host
    Simulate {
        /// Path to scenario file (YAML format)
        scenario: PathBuf,

        /// Directory to write resulting notebook JSON files into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            author: None,
            command: Commands::Preview {
                file: "notebook.ipynb".to_string(),
            },
        }
    }
}
