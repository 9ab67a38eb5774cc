//! Reference document catalog: one `<id>.md` file per supporting document.

use crate::error::{Result, SkipReason};
use crate::filename::{self, DOCUMENT_PATTERN};
use crate::ids::DocumentId;
use crate::observer::{report_skip, CatalogKind, LoadObserver};
use crate::source::{read_text, EntrySource};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

static SOURCE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*Source URL:\*\*\s*(https?://\S+)")
        .expect("source url pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceDocument {
    pub id: DocumentId,
    /// First heading text, the raw first line, or the id.
    pub name: String,
    pub content: String,
    /// Empty when the document carries no `**Source URL:**` marker.
    pub source_url: String,
}

/// Reference documents ordered by numeric id.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    documents: Vec<ReferenceDocument>,
}

impl ReferenceCatalog {
    /// Load every `<digits>.md` file in `source`.
    ///
    /// Same failure split as the control catalog: a missing source is fatal,
    /// individual files are skipped and reported.
    pub fn load(source: &dyn EntrySource, observer: &mut dyn LoadObserver) -> Result<Self> {
        let mut documents = Vec::new();

        for file_name in source.list_entries()? {
            match load_document(source, &file_name) {
                Ok(document) => {
                    log::debug!("Loaded document {} ({})", document.id, document.name);
                    documents.push(document);
                }
                Err(reason) => report_skip(
                    observer,
                    CatalogKind::Documents,
                    source.location(),
                    &file_name,
                    reason,
                ),
            }
        }

        documents.sort_by(|a, b| a.id.numeric_cmp(&b.id));
        observer.on_loaded(CatalogKind::Documents, documents.len());
        Ok(Self { documents })
    }

    pub fn from_documents(mut documents: Vec<ReferenceDocument>) -> Self {
        documents.sort_by(|a, b| a.id.numeric_cmp(&b.id));
        Self { documents }
    }

    pub fn documents(&self) -> &[ReferenceDocument] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceDocument> {
        self.documents.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ReferenceDocument> {
        self.documents.iter().find(|doc| doc.id.as_str() == id)
    }

    /// Identifier universe that selection reports are resolved against.
    pub fn known_ids(&self) -> HashSet<DocumentId> {
        self.documents.iter().map(|doc| doc.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn load_document(
    source: &dyn EntrySource,
    file_name: &str,
) -> std::result::Result<ReferenceDocument, SkipReason> {
    if !filename::is_markdown(file_name) {
        return Err(SkipReason::NotMarkdown);
    }
    let id = filename::parse_document_filename(file_name).map_err(|cause| {
        SkipReason::MalformedFilename {
            expected: DOCUMENT_PATTERN,
            cause,
        }
    })?;
    let content = read_text(source, file_name).map_err(|e| SkipReason::UnreadableFile {
        detail: e.to_string(),
    })?;

    let name = extract_title(&content).unwrap_or_else(|| id.to_string());
    let source_url = extract_source_url(&content).unwrap_or_default();
    Ok(ReferenceDocument {
        id,
        name,
        content,
        source_url,
    })
}

/// Display title taken from the first non-empty line.
///
/// Heading markers are stripped; a plain first line is used as-is. Returns
/// `None` for blank content or a bare `#` line.
pub fn extract_title(content: &str) -> Option<String> {
    let first = content.lines().map(str::trim).find(|line| !line.is_empty())?;
    let title = if first.starts_with('#') {
        first.trim_start_matches('#').trim()
    } else {
        first
    };
    (!title.is_empty()).then(|| title.to_string())
}

/// URL following the first `**Source URL:**` marker.
///
/// The marker may sit anywhere (bullet, table cell) and the URL may wrap
/// onto the next line.
pub fn extract_source_url(content: &str) -> Option<String> {
    SOURCE_URL
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
