//! nbheader - automatic metadata headers for notebook documents
//!
//! This library implements the core of an editor extension that inserts and
//! maintains a metadata header cell (title, date, category, tags, slug,
//! author, summary, last-modified) as the first cell of notebook documents.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `metadata`: metadata synthesis from file names (title, slug, timestamps)
//! - `host`: the abstract host environment (documents, edits, lifecycle events)
//! - `extension`: header insertion, Last-Modified tracking, session bookkeeping
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface for the development harness
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nbheader::{Config, HeaderExtension, MemoryHost};
//! use nbheader::host::NotebookHost;
//!
//! # fn main() -> anyhow::Result<()> {
//! let host = Arc::new(MemoryHost::new());
//! let extension = HeaderExtension::new(Config::default(), host as Arc<dyn NotebookHost>)?;
//! // Feed the extension lifecycle events from your host integration.
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extension;
pub mod host;
pub mod metadata;

// Re-export commonly used types
pub use config::Config;
pub use error::{NbheaderError, Result};
pub use extension::{HeaderExtension, SessionRegistry};
pub use host::{LifecycleEvent, LifecycleHandler, MemoryHost, NotebookDocument, NotebookHost};
pub use metadata::{MetadataSynthesizer, NotebookMetadata};

#[cfg(test)]
pub mod test_utils;
