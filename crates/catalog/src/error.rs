use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that abort a whole load call.
///
/// Problems with individual entries never surface here; they are reported
/// to the [`LoadObserver`](crate::LoadObserver) as a [`SkipReason`] instead.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The directory backing a catalog does not exist
    #[error("Directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    /// The directory exists but could not be listed
    #[error("Failed to list directory {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No control file carries the requested id
    #[error("No control file found matching id '{id}' in {}", location.display())]
    ControlNotFound { id: String, location: PathBuf },

    /// Several control files carry the requested id
    #[error("Multiple control files found matching id '{id}': {candidates:?}")]
    AmbiguousControl { id: String, candidates: Vec<String> },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Why a file name was rejected by the filename parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    #[error("missing .md extension")]
    MissingExtension,

    #[error("missing space between id and name")]
    MissingSeparator,

    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("empty name")]
    EmptyName,
}

/// Why an entry was left out of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File name does not follow the expected pattern
    MalformedFilename {
        expected: &'static str,
        cause: FilenameError,
    },

    /// File could not be read or is not valid UTF-8
    UnreadableFile { detail: String },

    /// Reserved template file in a selection directory
    ReservedTemplate,

    /// File without the `.md` suffix (`.gitkeep`, `.DS_Store`, ...)
    NotMarkdown,
}

impl SkipReason {
    /// Whether the skip points at a data defect worth a warning.
    ///
    /// Template and non-markdown files are expected residents of the
    /// catalog folders.
    pub fn is_warning(&self) -> bool {
        !matches!(self, SkipReason::ReservedTemplate | SkipReason::NotMarkdown)
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MalformedFilename { expected, cause } => {
                write!(f, "does not match expected pattern ({expected}): {cause}")
            }
            SkipReason::UnreadableFile { detail } => write!(f, "could not be read: {detail}"),
            SkipReason::ReservedTemplate => write!(f, "reserved template file"),
            SkipReason::NotMarkdown => write!(f, "not a markdown file"),
        }
    }
}
