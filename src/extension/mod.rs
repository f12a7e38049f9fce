//! Extension core: event wiring for automatic header maintenance
//!
//! [`HeaderExtension`] ties the pieces together. It subscribes to a host's
//! document lifecycle notifications and funnels them into the header
//! controller (open, manual command) and the modification tracker (save),
//! with per-session bookkeeping in a [`session::SessionRegistry`].
//!
//! # Modules
//!
//! - [`header`]: idempotent header insertion
//! - [`session`]: per-session document bookkeeping
//! - [`tracker`]: Last-Modified rewriting on save

pub mod header;
pub mod session;
pub mod tracker;

pub use header::HeaderController;
pub use session::{DocumentStatus, SessionRegistry};
pub use tracker::ModificationTracker;

use crate::config::Config;
use crate::error::Result;
use crate::host::{LifecycleEvent, LifecycleHandler, NotebookDocument, NotebookHost};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// The extension instance for one session
///
/// Owns the session registry; nothing lives at process scope. All event
/// handlers absorb their own failures (logged, never propagated), so a bad
/// document can never take down the host's event loop.
pub struct HeaderExtension {
    config: Config,
    host: Arc<dyn NotebookHost>,
    registry: SessionRegistry,
    controller: HeaderController,
    tracker: ModificationTracker,
}

impl HeaderExtension {
    /// Create an extension bound to a host
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config, host: Arc<dyn NotebookHost>) -> Result<Self> {
        config.validate()?;
        let controller = HeaderController::new(&config);
        let tracker = ModificationTracker::new(&config)?;

        info!("Notebook auto-header extension is now active");

        Ok(Self {
            config,
            host,
            registry: SessionRegistry::new(),
            controller,
            tracker,
        })
    }

    /// The extension's session registry (read-mostly; used for reporting)
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    fn is_eligible(&self, doc: &NotebookDocument) -> bool {
        doc.notebook_type == self.config.lifecycle.notebook_type
    }

    /// Manual "add metadata header" command
    ///
    /// Applies to the currently focused document. Surfaces an error notice
    /// when no eligible document is focused, a confirmation when a header
    /// was inserted, and an "already present" notice otherwise.
    pub async fn add_metadata_command(&self) -> Result<()> {
        let doc = match self.host.active_document() {
            Some(doc) if self.is_eligible(&doc) => doc,
            _ => {
                self.host.notify_error("Please open a notebook document first.");
                return Ok(());
            }
        };

        let inserted = self
            .controller
            .ensure_header(self.host.as_ref(), &self.registry, &doc)
            .await?;

        if inserted {
            self.host.notify_info("Metadata added to notebook!");
        } else {
            self.host.notify_info("Notebook already has a metadata header.");
        }

        Ok(())
    }

    /// Dispatch a lifecycle event, resolving the document through the host
    ///
    /// Convenience entry point for drivers that work with event values
    /// rather than calling the handler methods directly.
    pub async fn dispatch(&self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Opened(uri) => {
                if let Some(doc) = self.host.document(&uri) {
                    self.on_open(doc).await;
                }
            }
            LifecycleEvent::Saved(uri) => {
                if let Some(doc) = self.host.document(&uri) {
                    self.on_save(doc).await;
                }
            }
            LifecycleEvent::Closed(uri) => self.on_close(&uri).await,
        }
    }

    /// Shut the extension down, dropping all session bookkeeping
    pub fn shutdown(&self) {
        self.registry.clear();
        info!("Notebook auto-header extension is now deactivated");
    }
}

#[async_trait]
impl LifecycleHandler for HeaderExtension {
    async fn on_open(&self, doc: NotebookDocument) {
        if !self.is_eligible(&doc) || !doc.is_file() {
            return;
        }

        debug!(uri = %doc.uri, cells = doc.cell_count(), "Notebook opened");

        // The host may still be populating the initial cell list; wait
        // before inspecting so an already-present header is recognized.
        let delay = Duration::from_millis(self.config.lifecycle.open_delay_ms);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        // Re-snapshot after the delay; fall back to the open-time snapshot
        // if the document is already gone.
        let doc = self.host.document(&doc.uri).unwrap_or(doc);

        if let Err(e) = self
            .controller
            .ensure_header(self.host.as_ref(), &self.registry, &doc)
            .await
        {
            error!(uri = %doc.uri, error = %e, "Header insertion failed");
        }
    }

    async fn on_save(&self, doc: NotebookDocument) {
        if !self.is_eligible(&doc) {
            return;
        }

        if !self.controller.has_header_cell(&doc) {
            return;
        }

        self.tracker
            .record_save(self.host.as_ref(), &self.registry, &doc)
            .await;
    }

    async fn on_close(&self, uri: &str) {
        debug!(uri, "Notebook closed, dropping session bookkeeping");
        self.registry.forget(uri);
    }
}
