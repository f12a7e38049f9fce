//! Metadata synthesis for notebook header cells
//!
//! This module derives a [`NotebookMetadata`] record from a document's file
//! name: a title-cased display name, a URL-safe slug, and a creation
//! timestamp, plus placeholder fields filled in from configuration. All
//! derivations are total over strings; degenerate inputs produce empty
//! fields rather than errors.

use crate::config::HeaderConfig;
use std::path::Path;

/// Sentinel written into the `Last Modified:` line at insertion time,
/// overwritten with a real timestamp on the first save.
pub const LAST_MODIFIED_SENTINEL: &str = "XXXX-XX-XX XX:XX";

/// Metadata record embedded into a document's header cell
///
/// The record exists only as text inside cell 0; it is never persisted
/// independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookMetadata {
    /// Display title derived from the file base name
    pub title: String,
    /// Creation timestamp, `YYYY-MM-DD HH:MM` local time
    pub date: String,
    /// Last-modified timestamp, initially [`LAST_MODIFIED_SENTINEL`]
    pub last_modified: String,
    /// Category placeholder
    pub category: String,
    /// Tag placeholders, rendered comma-separated
    pub tags: Vec<String>,
    /// URL-safe slug derived from the file base name
    pub slug: String,
    /// Author name
    pub author: String,
    /// Summary, defaults to the title
    pub summary: String,
}

impl NotebookMetadata {
    /// Serialize the record into the eight fixed-order header lines
    pub fn render(&self) -> String {
        format!(
            "Title: {}\n\
             Date: {}\n\
             Category: {}\n\
             Tags: {}\n\
             Slug: {}\n\
             Author: {}\n\
             Summary: {}\n\
             Last Modified: {}",
            self.title,
            self.date,
            self.category,
            self.tags.join(","),
            self.slug,
            self.author,
            self.summary,
            self.last_modified,
        )
    }
}

/// Synthesizes [`NotebookMetadata`] records from file names
///
/// Placeholder fields (author, category, tags) are captured from
/// configuration at construction time; everything else is derived per call.
#[derive(Debug, Clone)]
pub struct MetadataSynthesizer {
    author: String,
    category: String,
    tags: Vec<String>,
}

impl MetadataSynthesizer {
    /// Create a synthesizer from header configuration
    pub fn new(header: &HeaderConfig) -> Self {
        Self {
            author: header.author.clone(),
            category: header.category.clone(),
            tags: header.tags.clone(),
        }
    }

    /// Derive a metadata record from a document file name
    ///
    /// Pure apart from reading the wall clock; always produces a value,
    /// even for an empty name.
    pub fn synthesize(&self, file_name: &str) -> NotebookMetadata {
        let base = base_name(file_name);
        let title = derive_title(&base);
        let slug = derive_slug(&base);

        NotebookMetadata {
            summary: title.clone(),
            title,
            date: current_date_time(),
            last_modified: LAST_MODIFIED_SENTINEL.to_string(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            slug,
            author: self.author.clone(),
        }
    }
}

/// Current local time as `YYYY-MM-DD HH:MM`, zero-padded, minute precision
///
/// No timezone offset is recorded; the value is ambiguous across timezone
/// changes and is kept that way deliberately.
pub fn current_date_time() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// File base name with the extension stripped
fn base_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Title-case a base name: `-`/`_` runs become single spaces, the first
/// letter of every word is uppercased
pub fn derive_title(base: &str) -> String {
    let spaced: String = base
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();

    spaced
        .split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Slugify a base name: lowercase, runs outside `[a-z0-9]` collapse to one
/// hyphen, leading/trailing hyphens stripped
pub fn derive_slug(base: &str) -> String {
    let mut slug = String::with_capacity(base.len());
    let mut pending_hyphen = false;

    for c in base.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
