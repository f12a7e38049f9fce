//! Last-Modified tracking on save
//!
//! On every save of a document whose first cell is a metadata header, the
//! tracker rewrites the `Last Modified:` line with the current timestamp
//! and re-saves, guarded against reacting to its own re-save.

use crate::config::Config;
use crate::error::{NbheaderError, Result};
use crate::extension::session::SessionRegistry;
use crate::host::{NotebookCell, NotebookDocument, NotebookEdit, NotebookHost};
use crate::metadata::current_date_time;
use regex::Regex;
use std::time::Duration;
use tracing::{debug, error, info};

/// Rewrites the Last-Modified header line on save
#[derive(Debug, Clone)]
pub struct ModificationTracker {
    last_modified_pattern: Regex,
    resave_delay: Duration,
}

impl ModificationTracker {
    /// Create a tracker from configuration
    ///
    /// # Errors
    ///
    /// Returns `NbheaderError::Regex` if the substitution pattern fails to
    /// compile.
    pub fn new(config: &Config) -> Result<Self> {
        let last_modified_pattern =
            Regex::new(r"Last Modified: .*").map_err(NbheaderError::Regex)?;
        Ok(Self {
            last_modified_pattern,
            resave_delay: Duration::from_millis(config.lifecycle.resave_delay_ms),
        })
    }

    /// Handle a save of a document that carries a header cell
    ///
    /// Exits immediately when an update for this document is already in
    /// flight (the save being handled is the tracker's own re-save). The
    /// in-flight mark is cleared on every exit path, including failures, so
    /// future saves of the document are never wedged.
    ///
    /// # Returns
    ///
    /// `true` if the Last-Modified line was rewritten and the document
    /// re-saved.
    pub async fn record_save(
        &self,
        host: &dyn NotebookHost,
        registry: &SessionRegistry,
        doc: &NotebookDocument,
    ) -> bool {
        if !registry.begin_update(&doc.uri) {
            debug!(uri = %doc.uri, "Save is a tracker re-save, skipping");
            return false;
        }

        let outcome = self.update_last_modified(host, doc).await;
        registry.end_update(&doc.uri);

        match outcome {
            Ok(updated) => {
                if updated {
                    info!(uri = %doc.uri, "Updated Last Modified");
                }
                updated
            }
            Err(e) => {
                error!(uri = %doc.uri, error = %e, "Last-Modified update failed");
                false
            }
        }
    }

    async fn update_last_modified(
        &self,
        host: &dyn NotebookHost,
        doc: &NotebookDocument,
    ) -> Result<bool> {
        let Some(first) = doc.cell_at(0) else {
            return Ok(false);
        };

        let replacement = format!("Last Modified: {}", current_date_time());
        let updated_text = self
            .last_modified_pattern
            .replace(&first.text, replacement.as_str())
            .into_owned();

        // Everything but the text carries over unchanged.
        let cell = NotebookCell {
            text: updated_text,
            ..first.clone()
        };

        let accepted = host
            .apply_edit(&doc.uri, NotebookEdit::ReplaceCell { index: 0, cell })
            .await?;
        if !accepted {
            debug!(uri = %doc.uri, "Host rejected Last-Modified replacement");
            return Ok(false);
        }

        // Let the edit settle before asking the host to persist it.
        tokio::time::sleep(self.resave_delay).await;
        host.save(&doc.uri).await?;

        Ok(true)
    }
}
