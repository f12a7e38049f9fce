//! Host environment abstraction
//!
//! The extension core never talks to a concrete editor. It consumes document
//! lifecycle notifications through [`LifecycleHandler`] and issues edits and
//! saves through [`NotebookHost`]. Tests and the simulate command drive the
//! core with [`memory::MemoryHost`]; an editor integration would implement
//! the same traits over its own API.
//!
//! # Modules
//!
//! - [`types`]: cell, document snapshot, and edit request types
//! - [`memory`]: in-memory host used by tests and the simulator

pub mod memory;
pub mod types;

pub use memory::MemoryHost;
pub use types::{CellKind, NotebookCell, NotebookDocument, NotebookEdit};

use crate::error::Result;
use async_trait::async_trait;

/// A document lifecycle notification, as delivered by a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A document was opened
    Opened(String),
    /// A document was saved to storage
    Saved(String),
    /// A document was closed
    Closed(String),
}

/// Editing and notification surface provided by the host environment
///
/// Edit requests against the same document are assumed to be serialized by
/// the host; the core adds no locking of its own.
#[async_trait]
pub trait NotebookHost: Send + Sync {
    /// Current snapshot of the document with the given uri, if open
    fn document(&self, uri: &str) -> Option<NotebookDocument>;

    /// Snapshot of the currently focused document, if any
    fn active_document(&self) -> Option<NotebookDocument>;

    /// Apply a single atomic edit to a document
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the host accepted the edit, `Ok(false)` if it rejected
    /// it. Rejection is an expected outcome, not an error.
    async fn apply_edit(&self, uri: &str, edit: NotebookEdit) -> Result<bool>;

    /// Persist a document to storage
    ///
    /// Implementations must deliver the corresponding [`LifecycleEvent::Saved`]
    /// notification to the subscribed handler *before* this call returns,
    /// matching editor semantics. The tracker's re-entrancy guard depends on
    /// this ordering.
    async fn save(&self, uri: &str) -> Result<()>;

    /// Show an informational notice to the user
    fn notify_info(&self, message: &str);

    /// Show an error notice to the user
    fn notify_error(&self, message: &str);
}

/// Subscriber interface for document lifecycle notifications
///
/// Handlers never fail outward; anything that goes wrong during event
/// processing is logged and absorbed so the host's event loop is unaffected.
#[async_trait]
pub trait LifecycleHandler: Send + Sync {
    /// A document was opened
    async fn on_open(&self, doc: NotebookDocument);

    /// A document was saved
    async fn on_save(&self, doc: NotebookDocument);

    /// A document was closed
    async fn on_close(&self, uri: &str);
}
