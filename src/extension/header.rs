//! Header lifecycle controller
//!
//! Decides whether a document already carries a metadata header cell and,
//! if not, synthesizes and inserts one at position 0. Insertion happens at
//! most once per document per session.

use crate::config::Config;
use crate::error::Result;
use crate::extension::session::SessionRegistry;
use crate::host::{CellKind, NotebookCell, NotebookDocument, NotebookEdit, NotebookHost};
use crate::metadata::{MetadataSynthesizer, NotebookMetadata};
use tracing::{info, warn};

/// Controller for the `no-header -> header-present` transition
#[derive(Debug, Clone)]
pub struct HeaderController {
    synthesizer: MetadataSynthesizer,
    cell_language: String,
    primary_language: String,
}

impl HeaderController {
    /// Create a controller from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            synthesizer: MetadataSynthesizer::new(&config.header),
            cell_language: config.header.cell_language.clone(),
            primary_language: config.header.primary_language.clone(),
        }
    }

    /// Structural check: does cell 0 look like a metadata header?
    ///
    /// A cell counts as a header iff it is a code-kind cell with the
    /// plain-text header language and its text contains both the `Title:`
    /// and `Date:` literals. There is no dedicated marker.
    pub fn has_header_cell(&self, doc: &NotebookDocument) -> bool {
        match doc.cell_at(0) {
            Some(cell) => {
                cell.kind == CellKind::Code
                    && cell.language == self.cell_language
                    && cell.text.contains("Title:")
                    && cell.text.contains("Date:")
            }
            None => false,
        }
    }

    /// Ensure the document carries a metadata header
    ///
    /// # Returns
    ///
    /// `Ok(true)` if an insertion was performed. `Ok(false)` if the document
    /// was already handled this session, already has a header, or the host
    /// rejected the edit (in which case nothing is marked, so a later call
    /// may retry).
    ///
    /// # Errors
    ///
    /// Propagates host transport failures from the edit submission.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbheader::extension::{HeaderController, SessionRegistry};
    /// use nbheader::{Config, MemoryHost, NotebookDocument, NotebookHost};
    ///
    /// let host = MemoryHost::new();
    /// host.insert_document(NotebookDocument::new(
    ///     "file:///post.ipynb",
    ///     "jupyter-notebook",
    ///     vec![],
    /// ));
    ///
    /// let controller = HeaderController::new(&Config::default());
    /// let registry = SessionRegistry::new();
    ///
    /// # tokio_test::block_on(async {
    /// let doc = host.document("file:///post.ipynb").unwrap();
    /// let inserted = controller.ensure_header(&host, &registry, &doc).await.unwrap();
    /// assert!(inserted);
    /// # });
    /// ```
    pub async fn ensure_header(
        &self,
        host: &dyn NotebookHost,
        registry: &SessionRegistry,
        doc: &NotebookDocument,
    ) -> Result<bool> {
        // Short-circuits duplicate concurrent triggers for the same document.
        if registry.is_inserted(&doc.uri) {
            return Ok(false);
        }

        // An already-labeled document is left untouched and not marked, so
        // the manual command can keep reporting "already present".
        if self.has_header_cell(doc) {
            return Ok(false);
        }

        let metadata = self.synthesizer.synthesize(&doc.file_path);
        let header = self.header_cell(&metadata);

        // An otherwise-empty document also gets a blank code cell so the
        // editor can still infer the execution language.
        let cells = if doc.cell_count() == 0 {
            vec![header, NotebookCell::code(&self.primary_language, "")]
        } else {
            vec![header]
        };

        let accepted = host
            .apply_edit(&doc.uri, NotebookEdit::InsertCells { index: 0, cells })
            .await?;

        if accepted {
            registry.mark_inserted(&doc.uri);
            info!(uri = %doc.uri, title = %metadata.title, "Inserted metadata header");
        } else {
            warn!(uri = %doc.uri, "Host rejected header insertion");
        }

        Ok(accepted)
    }

    fn header_cell(&self, metadata: &NotebookMetadata) -> NotebookCell {
        NotebookCell {
            kind: CellKind::Code,
            language: self.cell_language.clone(),
            text: metadata.render(),
            editable: false,
            runnable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn controller() -> HeaderController {
        HeaderController::new(&Config::default())
    }

    fn doc(uri: &str, cells: Vec<NotebookCell>) -> NotebookDocument {
        NotebookDocument::new(uri, "jupyter-notebook", cells)
    }

    fn header_cell(text: &str) -> NotebookCell {
        NotebookCell {
            kind: CellKind::Code,
            language: "raw".to_string(),
            text: text.to_string(),
            editable: false,
            runnable: false,
        }
    }

    #[test]
    fn test_empty_document_has_no_header() {
        assert!(!controller().has_header_cell(&doc("file:///a.ipynb", vec![])));
    }

    #[test]
    fn test_structural_header_detection() {
        let cell = header_cell("Title: A\nDate: 2024-01-01 10:00");
        assert!(controller().has_header_cell(&doc("file:///a.ipynb", vec![cell])));
    }

    #[test]
    fn test_code_cell_is_not_a_header() {
        let cell = NotebookCell::code("python", "Title: A\nDate: whenever");
        assert!(!controller().has_header_cell(&doc("file:///a.ipynb", vec![cell])));
    }

    #[test]
    fn test_header_requires_both_literals() {
        let cell = header_cell("Title: A\nSomething else");
        assert!(!controller().has_header_cell(&doc("file:///a.ipynb", vec![cell])));

        let cell = header_cell("Date: 2024-01-01 10:00");
        assert!(!controller().has_header_cell(&doc("file:///a.ipynb", vec![cell])));
    }

    #[tokio::test]
    async fn test_insert_into_empty_document_adds_blank_code_cell() {
        let host = MemoryHost::new();
        let registry = SessionRegistry::new();
        host.insert_document(doc("file:///my-first-post.ipynb", vec![]));

        let inserted = controller()
            .ensure_header(
                &host,
                &registry,
                &host.document("file:///my-first-post.ipynb").unwrap(),
            )
            .await
            .unwrap();
        assert!(inserted);

        let snapshot = host.document("file:///my-first-post.ipynb").unwrap();
        assert_eq!(snapshot.cell_count(), 2);

        let header = snapshot.cell_at(0).unwrap();
        assert_eq!(header.language, "raw");
        assert!(!header.editable);
        assert!(!header.runnable);
        assert!(header.text.starts_with("Title: My First Post\n"));

        let blank = snapshot.cell_at(1).unwrap();
        assert_eq!(blank.kind, CellKind::Code);
        assert_eq!(blank.language, "python");
        assert_eq!(blank.text, "");
    }

    #[tokio::test]
    async fn test_insert_shifts_existing_cells_unchanged() {
        let host = MemoryHost::new();
        let registry = SessionRegistry::new();
        let original = NotebookCell::code("python", "import numpy as np");
        host.insert_document(doc("file:///analysis.ipynb", vec![original.clone()]));

        let inserted = controller()
            .ensure_header(
                &host,
                &registry,
                &host.document("file:///analysis.ipynb").unwrap(),
            )
            .await
            .unwrap();
        assert!(inserted);

        let snapshot = host.document("file:///analysis.ipynb").unwrap();
        assert_eq!(snapshot.cell_count(), 2);
        assert!(snapshot.cell_at(0).unwrap().text.contains("Title: Analysis"));
        assert_eq!(snapshot.cell_at(1).unwrap(), &original);
    }

    #[tokio::test]
    async fn test_ensure_header_is_idempotent() {
        let host = MemoryHost::new();
        let registry = SessionRegistry::new();
        host.insert_document(doc("file:///a.ipynb", vec![]));
        let c = controller();

        let first = c
            .ensure_header(&host, &registry, &host.document("file:///a.ipynb").unwrap())
            .await
            .unwrap();
        let second = c
            .ensure_header(&host, &registry, &host.document("file:///a.ipynb").unwrap())
            .await
            .unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(host.document("file:///a.ipynb").unwrap().cell_count(), 2);
    }

    #[tokio::test]
    async fn test_preexisting_header_is_not_marked() {
        let host = MemoryHost::new();
        let registry = SessionRegistry::new();
        let cell = header_cell("Title: A\nDate: 2024-01-01 10:00");
        host.insert_document(doc("file:///a.ipynb", vec![cell]));

        let inserted = controller()
            .ensure_header(&host, &registry, &host.document("file:///a.ipynb").unwrap())
            .await
            .unwrap();
        assert!(!inserted);
        assert!(!registry.is_inserted("file:///a.ipynb"));
        assert_eq!(host.document("file:///a.ipynb").unwrap().cell_count(), 1);
    }

    #[tokio::test]
    async fn test_rejected_edit_leaves_retry_possible() {
        let host = MemoryHost::new();
        let registry = SessionRegistry::new();
        host.insert_document(doc("file:///a.ipynb", vec![]));
        let c = controller();

        host.set_reject_edits(true);
        let inserted = c
            .ensure_header(&host, &registry, &host.document("file:///a.ipynb").unwrap())
            .await
            .unwrap();
        assert!(!inserted);
        assert!(!registry.is_inserted("file:///a.ipynb"));

        host.set_reject_edits(false);
        let inserted = c
            .ensure_header(&host, &registry, &host.document("file:///a.ipynb").unwrap())
            .await
            .unwrap();
        assert!(inserted);
    }
}
