//! In-memory notebook host
//!
//! A [`NotebookHost`] implementation backed by a `HashMap` of documents.
//! Tests drive the extension core against it with synthetic events, and the
//! simulate command uses it to replay scenario files. Documents can be
//! loaded from and stored to a minimal JSON notebook form.

use super::{LifecycleHandler, NotebookCell, NotebookDocument, NotebookEdit, NotebookHost};
use crate::error::{NbheaderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, Weak};

#[derive(Default)]
struct HostState {
    documents: HashMap<String, NotebookDocument>,
    active: Option<String>,
    save_counts: HashMap<String, usize>,
    reject_edits: bool,
    fail_edits: bool,
    infos: Vec<String>,
    errors: Vec<String>,
}

/// In-memory host for tests and simulation
///
/// Saving a document delivers the saved notification to the subscribed
/// handler before `save` returns, as [`NotebookHost::save`] requires.
#[derive(Default)]
pub struct MemoryHost {
    state: Mutex<HostState>,
    subscriber: Mutex<Option<Weak<dyn LifecycleHandler>>>,
}

impl MemoryHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().expect("host state lock poisoned")
    }

    /// Subscribe a lifecycle handler to this host's notifications
    ///
    /// A weak reference is held so the handler and host may reference each
    /// other without leaking.
    pub fn subscribe(&self, handler: Weak<dyn LifecycleHandler>) {
        *self
            .subscriber
            .lock()
            .expect("subscriber lock poisoned") = Some(handler);
    }

    fn handler(&self) -> Option<std::sync::Arc<dyn LifecycleHandler>> {
        self.subscriber
            .lock()
            .expect("subscriber lock poisoned")
            .as_ref()
            .and_then(Weak::upgrade)
    }

    /// Add (or replace) a document and make it the active one
    pub fn insert_document(&self, doc: NotebookDocument) {
        let mut state = self.state();
        state.active = Some(doc.uri.clone());
        state.documents.insert(doc.uri.clone(), doc);
    }

    /// Change which document is focused; `None` clears focus
    pub fn set_active(&self, uri: Option<&str>) {
        self.state().active = uri.map(str::to_string);
    }

    /// Remove a document, as the host does when it closes
    pub fn remove_document(&self, uri: &str) {
        let mut state = self.state();
        state.documents.remove(uri);
        if state.active.as_deref() == Some(uri) {
            state.active = None;
        }
    }

    /// Number of times `save` has been called for a document
    pub fn save_count(&self, uri: &str) -> usize {
        self.state().save_counts.get(uri).copied().unwrap_or(0)
    }

    /// Make subsequent edit submissions be rejected, as a host may
    pub fn set_reject_edits(&self, reject: bool) {
        self.state().reject_edits = reject;
    }

    /// Make subsequent edit submissions error out entirely
    pub fn set_fail_edits(&self, fail: bool) {
        self.state().fail_edits = fail;
    }

    /// Informational notices shown so far
    pub fn infos(&self) -> Vec<String> {
        self.state().infos.clone()
    }

    /// Error notices shown so far
    pub fn errors(&self) -> Vec<String> {
        self.state().errors.clone()
    }
}

#[async_trait]
impl NotebookHost for MemoryHost {
    fn document(&self, uri: &str) -> Option<NotebookDocument> {
        self.state().documents.get(uri).cloned()
    }

    fn active_document(&self) -> Option<NotebookDocument> {
        let state = self.state();
        state
            .active
            .as_ref()
            .and_then(|uri| state.documents.get(uri))
            .cloned()
    }

    async fn apply_edit(&self, uri: &str, edit: NotebookEdit) -> Result<bool> {
        let mut state = self.state();
        if state.fail_edits {
            return Err(NbheaderError::Host("injected edit failure".to_string()).into());
        }
        if state.reject_edits {
            tracing::debug!(uri, "Rejecting edit (reject_edits set)");
            return Ok(false);
        }

        let Some(doc) = state.documents.get_mut(uri) else {
            tracing::debug!(uri, "Edit against unknown document");
            return Ok(false);
        };

        match edit {
            NotebookEdit::InsertCells { index, cells } => {
                if index > doc.cells.len() {
                    return Ok(false);
                }
                doc.cells.splice(index..index, cells);
            }
            NotebookEdit::ReplaceCell { index, cell } => {
                let Some(slot) = doc.cells.get_mut(index) else {
                    return Ok(false);
                };
                *slot = cell;
            }
        }

        Ok(true)
    }

    async fn save(&self, uri: &str) -> Result<()> {
        let doc = {
            let mut state = self.state();
            let Some(doc) = state.documents.get(uri).cloned() else {
                return Err(NbheaderError::UnknownDocument(uri.to_string()).into());
            };
            *state.save_counts.entry(uri.to_string()).or_insert(0) += 1;
            doc
        };

        // Deliver the saved notification before returning, as editors do.
        if let Some(handler) = self.handler() {
            handler.on_save(doc).await;
        }

        Ok(())
    }

    fn notify_info(&self, message: &str) {
        tracing::info!(message, "Host info notice");
        self.state().infos.push(message.to_string());
    }

    fn notify_error(&self, message: &str) {
        tracing::warn!(message, "Host error notice");
        self.state().errors.push(message.to_string());
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct NotebookFile {
    #[serde(default)]
    cells: Vec<NotebookCell>,
}

/// Read cells from a JSON notebook file
pub fn read_notebook(path: &Path) -> Result<Vec<NotebookCell>> {
    let contents = std::fs::read_to_string(path).map_err(NbheaderError::Io)?;
    let file: NotebookFile = serde_json::from_str(&contents).map_err(NbheaderError::Serialization)?;
    Ok(file.cells)
}

/// Write cells to a JSON notebook file
pub fn write_notebook(path: &Path, cells: &[NotebookCell]) -> Result<()> {
    let file = NotebookFile {
        cells: cells.to_vec(),
    };
    let contents = serde_json::to_string_pretty(&file).map_err(NbheaderError::Serialization)?;
    std::fs::write(path, contents).map_err(NbheaderError::Io)?;
    Ok(())
}
