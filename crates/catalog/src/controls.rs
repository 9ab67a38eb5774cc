//! Control catalog: one `<major>.<minor> <name>.md` file per ISO-27001 control.

use crate::error::{CatalogError, Result, SkipReason};
use crate::filename::{self, CONTROL_PATTERN};
use crate::ids::ControlId;
use crate::observer::{report_skip, CatalogKind, LoadObserver};
use crate::source::{read_text, EntrySource};
use serde::Serialize;
use std::path::PathBuf;

/// A single control loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub id: ControlId,
    pub name: String,
    pub content: String,
}

impl Control {
    /// `"<id> <name>"`, the label used for graph nodes.
    pub fn label(&self) -> String {
        format!("{} {}", self.id, self.name)
    }
}

/// Controls ordered by `(major, minor)`.
///
/// Duplicate ids are kept; they stay in file-name order.
#[derive(Debug, Clone, Default)]
pub struct ControlCatalog {
    controls: Vec<Control>,
}

impl ControlCatalog {
    /// Load every control file in `source`.
    ///
    /// Fails only when the source itself is missing; unmatched or unreadable
    /// files are reported to `observer` and left out.
    pub fn load(source: &dyn EntrySource, observer: &mut dyn LoadObserver) -> Result<Self> {
        let mut controls = Vec::new();

        for file_name in source.list_entries()? {
            match load_control(source, &file_name) {
                Ok(control) => {
                    log::debug!("Loaded control {} from '{file_name}'", control.id);
                    controls.push(control);
                }
                Err(reason) => report_skip(
                    observer,
                    CatalogKind::Controls,
                    source.location(),
                    &file_name,
                    reason,
                ),
            }
        }

        controls.sort_by(|a, b| a.id.numeric_cmp(&b.id));
        observer.on_loaded(CatalogKind::Controls, controls.len());
        Ok(Self { controls })
    }

    pub fn from_controls(mut controls: Vec<Control>) -> Self {
        controls.sort_by(|a, b| a.id.numeric_cmp(&b.id));
        Self { controls }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Control> {
        self.controls.iter()
    }

    /// First control carrying `id`.
    pub fn get(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

fn load_control(
    source: &dyn EntrySource,
    file_name: &str,
) -> std::result::Result<Control, SkipReason> {
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
    Ok(Control {
        id: parsed.id,
        name: parsed.name,
        content,
    })
}

/// Resolve a control id to the single file that holds it.
///
/// Matches `<id> <anything>` or exactly `<id>.md`, so `5.2` never picks up
/// `5.20 …`. Zero or several matches are errors.
pub fn locate_control_entry(source: &dyn EntrySource, id: &str) -> Result<PathBuf> {
    let mut matches: Vec<String> = source
        .list_entries()?
        .into_iter()
        .filter(|name| filename::names_control(name, id))
        .collect();

    match matches.len() {
        0 => Err(CatalogError::ControlNotFound {
            id: id.to_string(),
            location: source.location().to_path_buf(),
        }),
        1 => Ok(source.location().join(matches.remove(0))),
        _ => Err(CatalogError::AmbiguousControl {
            id: id.to_string(),
            candidates: matches,
        }),
    }
}
