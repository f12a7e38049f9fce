//! Session bookkeeping for the extension
//!
//! Tracks, per document, whether a header insertion has already happened
//! this session and whether a Last-Modified update is currently in flight.
//! The registry is owned by the extension instance; nothing here is global
//! or persisted. There is no true parallelism in the lifecycle model, only
//! re-entrancy from nested async callbacks, so plain flags behind a mutex
//! are sufficient.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Observable status of a document in the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    /// A header was inserted this session
    HeaderInserted,
    /// A Last-Modified re-save is in flight
    UpdateInFlight,
}

#[derive(Debug, Default, Clone, Copy)]
struct DocumentState {
    header_inserted: bool,
    update_in_flight: bool,
}

/// Per-session registry of document bookkeeping, keyed by document uri
///
/// Entries are dropped when a document closes and the whole registry is
/// cleared on shutdown. The mutex is never held across an await point.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    inner: Mutex<HashMap<String, DocumentState>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, HashMap<String, DocumentState>> {
        self.inner.lock().expect("session registry lock poisoned")
    }

    /// Whether a header insertion was already performed for this document
    pub fn is_inserted(&self, uri: &str) -> bool {
        self.inner()
            .get(uri)
            .map(|state| state.header_inserted)
            .unwrap_or(false)
    }

    /// Record a completed header insertion
    pub fn mark_inserted(&self, uri: &str) {
        self.inner().entry(uri.to_string()).or_default().header_inserted = true;
    }

    /// Try to begin a Last-Modified update
    ///
    /// # Returns
    ///
    /// `false` if an update is already in flight for this document (the save
    /// being handled is the tracker's own re-save, or a concurrent handler
    /// got there first), `true` if the caller now holds the in-flight mark.
    pub fn begin_update(&self, uri: &str) -> bool {
        let mut inner = self.inner();
        let state = inner.entry(uri.to_string()).or_default();
        if state.update_in_flight {
            return false;
        }
        state.update_in_flight = true;
        true
    }

    /// End a Last-Modified update, whatever its outcome
    pub fn end_update(&self, uri: &str) {
        if let Some(state) = self.inner().get_mut(uri) {
            state.update_in_flight = false;
        }
    }

    /// Drop all bookkeeping for a document (on close)
    pub fn forget(&self, uri: &str) {
        self.inner().remove(uri);
    }

    /// Drop all bookkeeping (on shutdown)
    pub fn clear(&self) {
        self.inner().clear();
    }

    /// Observable status of a document, if any is recorded
    ///
    /// An in-flight update takes precedence over the inserted mark.
    pub fn status(&self, uri: &str) -> Option<DocumentStatus> {
        self.inner().get(uri).and_then(|state| {
            if state.update_in_flight {
                Some(DocumentStatus::UpdateInFlight)
            } else if state.header_inserted {
                Some(DocumentStatus::HeaderInserted)
            } else {
                None
            }
        })
    }
}
