//! File-name conventions shared by the catalogs.
//!
//! | Artifact           | Pattern                      |
//! |--------------------|------------------------------|
//! | Control file       | `<major>.<minor> <name>.md`  |
//! | Selection report   | `<major>.<minor> <name>.md`  |
//! | Reference document | `<id>.md`                    |

use crate::error::FilenameError;
use crate::ids::{ControlId, DocumentId};

pub const MARKDOWN_EXTENSION: &str = ".md";

pub(crate) const CONTROL_PATTERN: &str = "<major>.<minor> <name>.md";
pub(crate) const DOCUMENT_PATTERN: &str = "<id>.md";

/// Id and display name parsed from a control-shaped file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFilename {
    pub id: ControlId,
    pub name: String,
}

/// Catalogs only iterate `*.md` files; the suffix is case-sensitive.
pub fn is_markdown(file_name: &str) -> bool {
    file_name.ends_with(MARKDOWN_EXTENSION)
}

/// Parse `<major>.<minor> <name>.md`.
///
/// The id is everything before the first space and the name is everything
/// between that space and the `.md` suffix, kept verbatim.
pub fn parse_control_filename(file_name: &str) -> Result<ControlFilename, FilenameError> {
    let stem = file_name
        .strip_suffix(MARKDOWN_EXTENSION)
        .ok_or(FilenameError::MissingExtension)?;
    let (id, name) = stem
        .split_once(' ')
        .ok_or(FilenameError::MissingSeparator)?;
    let id = ControlId::parse(id)?;
    if name.trim().is_empty() {
        return Err(FilenameError::EmptyName);
    }
    Ok(ControlFilename {
        id,
        name: name.to_string(),
    })
}

/// Parse `<id>.md`.
pub fn parse_document_filename(file_name: &str) -> Result<DocumentId, FilenameError> {
    let stem = file_name
        .strip_suffix(MARKDOWN_EXTENSION)
        .ok_or(FilenameError::MissingExtension)?;
    DocumentId::parse(stem)
}

/// Case-insensitive match against the reserved template file name.
pub fn is_reserved_template(file_name: &str, template: &str) -> bool {
    file_name.to_lowercase() == template.to_lowercase()
}

/// True when `file_name` belongs to control `id`: `<id> …` or exactly `<id>.md`.
///
/// `5.2` never matches `5.20 Addressing….md`.
pub fn names_control(file_name: &str, id: &str) -> bool {
    let Some(rest) = file_name.strip_prefix(id) else {
        return false;
    };
    rest.starts_with(' ') || rest == MARKDOWN_EXTENSION
}
