//! Simulate command: replay a document lifecycle scenario
//!
//! Loads a YAML scenario describing a set of notebook documents and a
//! sequence of lifecycle events (open, save, close, manual command), replays
//! it against a [`MemoryHost`] with the extension subscribed, and reports
//! the resulting documents. Optionally writes the final notebooks out as
//! JSON files.

use crate::config::Config;
use crate::error::{NbheaderError, Result};
use crate::extension::HeaderExtension;
use crate::host::{
    memory::{read_notebook, write_notebook},
    LifecycleEvent, LifecycleHandler, MemoryHost, NotebookCell, NotebookDocument, NotebookHost,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// A lifecycle scenario: documents plus an ordered event sequence
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    documents: Vec<ScenarioDocument>,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    events: Vec<ScenarioEvent>,
}

/// A document participating in the scenario
#[derive(Debug, Deserialize)]
struct ScenarioDocument {
    uri: String,

    #[serde(default = "default_notebook_type")]
    notebook_type: String,

    /// Inline cells; ignored when `file` is given
    #[serde(default)]
    cells: Vec<NotebookCell>,

    /// Notebook JSON file to load cells from, relative to the scenario file
    #[serde(default)]
    file: Option<PathBuf>,
}

fn default_notebook_type() -> String {
    "jupyter-notebook".to_string()
}

/// One scenario step
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScenarioEvent {
    /// The document was opened in the editor
    Open(String),
    /// The user saved the document
    Save(String),
    /// The document was closed
    Close(String),
    /// The user ran the add-metadata command with this document focused
    Command(String),
}

/// Replay a scenario file against the extension core
///
/// # Arguments
///
/// * `config` - Effective configuration for the extension
/// * `scenario_path` - Path to the YAML scenario
/// * `output` - Optional directory to write resulting notebook JSON into
///
/// # Errors
///
/// Returns `NbheaderError::Scenario` for unreadable or malformed scenarios
/// and propagates host failures during replay.
pub async fn run_simulate(
    config: Config,
    scenario_path: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let scenario = load_scenario(scenario_path)?;
    let base_dir = scenario_path.parent().unwrap_or_else(|| Path::new("."));

    let host = Arc::new(MemoryHost::new());
    let extension = Arc::new(HeaderExtension::new(
        config,
        host.clone() as Arc<dyn NotebookHost>,
    )?);
    let handler: Arc<dyn LifecycleHandler> = extension.clone();
    let weak: std::sync::Weak<dyn LifecycleHandler> = Arc::downgrade(&handler);
    host.subscribe(weak);

    let mut uris = Vec::new();
    for doc in &scenario.documents {
        let cells = match &doc.file {
            Some(file) => read_notebook(&base_dir.join(file))?,
            None => doc.cells.clone(),
        };
        uris.push(doc.uri.clone());
        host.insert_document(NotebookDocument::new(
            doc.uri.clone(),
            doc.notebook_type.clone(),
            cells,
        ));
    }
    host.set_active(None);

    info!(
        documents = scenario.documents.len(),
        events = scenario.events.len(),
        "Replaying scenario"
    );

    for event in &scenario.events {
        debug!(?event, "Dispatching scenario event");
        match event {
            ScenarioEvent::Open(uri) => {
                extension.dispatch(LifecycleEvent::Opened(uri.clone())).await;
            }
            ScenarioEvent::Save(uri) => {
                host.save(uri).await?;
            }
            ScenarioEvent::Close(uri) => {
                host.remove_document(uri);
                extension.dispatch(LifecycleEvent::Closed(uri.clone())).await;
            }
            ScenarioEvent::Command(uri) => {
                host.set_active(Some(uri));
                extension.add_metadata_command().await?;
            }
        }
    }

    report(&host, &extension, &uris);

    if let Some(dir) = output {
        std::fs::create_dir_all(dir).map_err(NbheaderError::Io)?;
        for uri in &uris {
            if let Some(doc) = host.document(uri) {
                let name = file_name_for(&doc);
                write_notebook(&dir.join(name), &doc.cells)?;
            }
        }
    }

    extension.shutdown();
    Ok(())
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        NbheaderError::Scenario(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_yaml::from_str(&contents)
        .map_err(|e| NbheaderError::Scenario(format!("Failed to parse scenario: {}", e)).into())
}

fn file_name_for(doc: &NotebookDocument) -> String {
    Path::new(&doc.file_path)
        .file_stem()
        .map(|stem| format!("{}.json", stem.to_string_lossy()))
        .unwrap_or_else(|| "notebook.json".to_string())
}

fn report(host: &MemoryHost, extension: &HeaderExtension, uris: &[String]) {
    for uri in uris {
        match host.document(uri) {
            Some(doc) => {
                let first_line = doc
                    .cell_at(0)
                    .and_then(|cell| cell.text.lines().next())
                    .unwrap_or("<empty>");
                println!(
                    "{}: {} cells, {} saves, status {:?}, first line: {}",
                    uri,
                    doc.cell_count(),
                    host.save_count(uri),
                    extension.registry().status(uri),
                    first_line
                );
            }
            None => println!("{}: closed, {} saves", uri, host.save_count(uri)),
        }
    }

    for message in host.infos() {
        println!("info: {}", message);
    }
    for message in host.errors() {
        println!("error: {}", message);
    }
}
