//! Selection index: resolves the cross-references inside selection reports.
//!
//! A selection report is a markdown file produced by an external
//! text-generation step, named like a control (`<major>.<minor> <name>.md`).
//! Its content is opaque except for one marker: every `/pages/<digits>`
//! substring names a candidate reference document.
//!
//! ```text
//! report text ──> /pages/<digits> candidates
//!                    ├─ dedupe
//!                    ├─ keep only ids the reference catalog knows
//!                    └─ sort by numeric value
//! ```
//!
//! Unknown ids are dropped silently; reports routinely link to pages outside
//! the exported document set.

use crate::config::SelectionOptions;
use crate::error::{Result, SkipReason};
use crate::filename::{self, CONTROL_PATTERN};
use crate::ids::{ControlId, DocumentId};
use crate::observer::{report_skip, CatalogKind, LoadObserver};
use crate::source::{read_text, EntrySource};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

static CROSS_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/pages/([0-9]+)").expect("cross-reference pattern is valid"));

/// Reference documents a report judged relevant to one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRecord {
    pub control_id: ControlId,
    pub control_name: String,
    /// Known ids only, unique, ascending by numeric value.
    pub relevant_document_ids: Vec<DocumentId>,
}

/// Selection records ordered by `(major, minor)` of the control id.
#[derive(Debug, Clone, Default)]
pub struct SelectionIndex {
    records: Vec<SelectionRecord>,
}

impl SelectionIndex {
    /// Load every selection report in `source` and resolve its references
    /// against `known`.
    pub fn load(
        source: &dyn EntrySource,
        known: &HashSet<DocumentId>,
        options: &SelectionOptions,
        observer: &mut dyn LoadObserver,
    ) -> Result<Self> {
        let mut records = Vec::new();

        for file_name in source.list_entries()? {
            match load_record(source, &file_name, known, options) {
                Ok(record) => {
                    log::debug!(
                        "Control {} references {} known documents",
                        record.control_id,
                        record.relevant_document_ids.len()
                    );
                    records.push(record);
                }
                Err(reason) => report_skip(
                    observer,
                    CatalogKind::Selections,
                    source.location(),
                    &file_name,
                    reason,
                ),
            }
        }

        records.sort_by(|a, b| a.control_id.numeric_cmp(&b.control_id));
        observer.on_loaded(CatalogKind::Selections, records.len());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[SelectionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectionRecord> {
        self.records.iter()
    }

    pub fn get(&self, control_id: &str) -> Option<&SelectionRecord> {
        self.records
            .iter()
            .find(|record| record.control_id.as_str() == control_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn load_record(
    source: &dyn EntrySource,
    file_name: &str,
    known: &HashSet<DocumentId>,
    options: &SelectionOptions,
) -> std::result::Result<SelectionRecord, SkipReason> {
    if filename::is_reserved_template(file_name, &options.template_file_name) {
        return Err(SkipReason::ReservedTemplate);
    }
    if !filename::is_markdown(file_name) {
        return Err(SkipReason::NotMarkdown);
    }
    let parsed =
        filename::parse_control_filename(file_name).map_err(|cause| SkipReason::MalformedFilename {
            expected: CONTROL_PATTERN,
            cause,
        })?;
    let content = read_text(source, file_name).map_err(|e| SkipReason::UnreadableFile {
        detail: e.to_string(),
    })?;

    Ok(SelectionRecord {
        control_id: parsed.id,
        control_name: parsed.name,
        relevant_document_ids: extract_cross_references(&content, known),
    })
}

/// Known document ids referenced by `/pages/<digits>` markers in `content`.
///
/// The result is unique and ascending by numeric value; ids that compare
/// equal numerically (`0123`, `123`) fall back to string order.
pub fn extract_cross_references(content: &str, known: &HashSet<DocumentId>) -> Vec<DocumentId> {
    let candidates: BTreeSet<&str> = CROSS_REFERENCE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let mut resolved: Vec<DocumentId> = candidates
        .into_iter()
        .filter_map(|candidate| DocumentId::parse(candidate).ok())
        .filter(|id| known.contains(id))
        .collect();
    resolved.sort_by(DocumentId::numeric_cmp);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::observer::SkipLog;
    use crate::source::MemoryDirectory;
    use pretty_assertions::assert_eq;

    fn known(ids: &[&str]) -> HashSet<DocumentId> {
        ids.iter().map(|id| DocumentId::parse(id).unwrap()).collect()
    }

    fn as_strs(ids: &[DocumentId]) -> Vec<&str> {
        ids.iter().map(DocumentId::as_str).collect()
    }

    #[test]
    fn duplicates_collapse_and_unknown_ids_drop() {
        let content = "See https://wiki/pages/123456/Doc and /pages/123456 again, \
                       plus /pages/999999 which is out of scope.";
        let ids = extract_cross_references(content, &known(&["123456"]));
        assert_eq!(as_strs(&ids), vec!["123456"]);
    }

    #[test]
    fn references_sort_numerically() {
        let content = "/pages/1000 /pages/20 /pages/3 /pages/abc /pages/ 4";
        let ids = extract_cross_references(content, &known(&["3", "20", "1000", "4"]));
        assert_eq!(as_strs(&ids), vec!["3", "20", "1000"]);
    }

    #[test]
    fn template_files_are_never_indexed() {
        let source = MemoryDirectory::new("selected")
            .with_file("template.md", "/pages/1")
            .with_file("Template.md", "/pages/1")
            .with_file("TEMPLATE.MD", "/pages/1")
            .with_file("5.1 Policies.md", "/pages/1 /pages/2");

        let mut log = SkipLog::new();
        let index = SelectionIndex::load(
            &source,
            &known(&["1"]),
            &SelectionOptions::default(),
            &mut log,
        )
        .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(as_strs(&index.records()[0].relevant_document_ids), vec!["1"]);
        assert_eq!(log.entries().len(), 3);
        assert!(log.is_clean());
    }

    #[test]
    fn records_sort_by_control_id() {
        let source = MemoryDirectory::new("selected")
            .with_file("5.10 Acceptable use.md", "/pages/7")
            .with_file("5.2 Roles.md", "")
            .with_file("5.1 Policies.md", "/pages/7 /pages/8")
            .with_file("notes.md", "/pages/7");

        let mut log = SkipLog::new();
        let index = SelectionIndex::load(
            &source,
            &known(&["7", "8"]),
            &SelectionOptions::default(),
            &mut log,
        )
        .unwrap();

        let order: Vec<&str> = index.iter().map(|r| r.control_id.as_str()).collect();
        assert_eq!(order, vec!["5.1", "5.2", "5.10"]);
        assert_eq!(index.get("5.1").unwrap().control_name, "Policies");
        assert!(index.get("5.2").unwrap().relevant_document_ids.is_empty());
        assert_eq!(log.warning_count(), 1);
    }

    #[test]
    fn custom_template_name_is_honored() {
        let source = MemoryDirectory::new("selected").with_file("Skeleton.md", "");
        let options = SelectionOptions {
            template_file_name: "skeleton.md".to_string(),
        };
        let mut log = SkipLog::new();
        let index = SelectionIndex::load(&source, &known(&[]), &options, &mut log).unwrap();
        assert!(index.is_empty());
        assert!(log.is_clean());
    }

    #[test]
    fn missing_directory_is_fatal() {
        let err = SelectionIndex::load(
            &MemoryDirectory::absent("selected"),
            &known(&[]),
            &SelectionOptions::default(),
            &mut SkipLog::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::MissingDirectory { .. }));
    }
}
