//! Document, cell, and edit types shared with the host environment
//!
//! These mirror the shapes a notebook editor exposes: immutable document
//! snapshots with indexable cells, and batched edit requests applied
//! atomically by the host.

use serde::{Deserialize, Serialize};

/// Kind of a notebook cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Executable cell
    Code,
    /// Rendered markup cell
    Markup,
}

/// A single notebook cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookCell {
    /// Cell kind
    pub kind: CellKind,
    /// Language id of the cell content
    pub language: String,
    /// Cell text
    #[serde(default)]
    pub text: String,
    /// Whether the cell may be edited in the UI
    #[serde(default = "default_flag")]
    pub editable: bool,
    /// Whether the cell may be executed
    #[serde(default = "default_flag")]
    pub runnable: bool,
}

fn default_flag() -> bool {
    true
}

impl NotebookCell {
    /// Create an ordinary editable, runnable code cell
    pub fn code(language: &str, text: &str) -> Self {
        Self {
            kind: CellKind::Code,
            language: language.to_string(),
            text: text.to_string(),
            editable: true,
            runnable: true,
        }
    }
}

/// Immutable snapshot of a notebook document
///
/// The `uri` is the document's identity for session bookkeeping; `file_path`
/// is the filesystem path the metadata is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookDocument {
    /// Document identity, e.g. `file:///notes/post.ipynb`
    pub uri: String,
    /// Filesystem path portion of the uri
    pub file_path: String,
    /// Notebook type reported by the host
    pub notebook_type: String,
    /// Cells in document order
    #[serde(default)]
    pub cells: Vec<NotebookCell>,
}

impl NotebookDocument {
    /// Create a snapshot, deriving `file_path` from the uri
    pub fn new(uri: impl Into<String>, notebook_type: impl Into<String>, cells: Vec<NotebookCell>) -> Self {
        let uri = uri.into();
        let file_path = uri.strip_prefix("file://").unwrap_or(&uri).to_string();
        Self {
            uri,
            file_path,
            notebook_type: notebook_type.into(),
            cells,
        }
    }

    /// Number of cells in the snapshot
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell at the given position, if any
    pub fn cell_at(&self, index: usize) -> Option<&NotebookCell> {
        self.cells.get(index)
    }

    /// Whether the document is backed by a file on disk
    pub fn is_file(&self) -> bool {
        self.uri.starts_with("file://")
    }
}

/// An edit request submitted to the host, applied atomically
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookEdit {
    /// Insert cells at `index`, shifting existing cells down
    InsertCells {
        /// Position of the first inserted cell
        index: usize,
        /// Cells to insert, in order
        cells: Vec<NotebookCell>,
    },
    /// Replace the cell at `index`
    ReplaceCell {
        /// Position of the replaced cell
        index: usize,
        /// Replacement cell
        cell: NotebookCell,
    },
}
