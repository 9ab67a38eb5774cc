//! # Control Map Catalog
//!
//! Loads the three markdown collections behind the ISO-27001 control map.
//!
//! ## Pipeline
//!
//! ```text
//! controls/                  documents/                 selected_documents_agent/
//!   5.1 Policies.md            1205665906.md              5.1 Policies.md
//!     │                          │                          │
//!     ├──> ControlCatalog        ├──> ReferenceCatalog      │
//!     │                          │      └─ known ids ───────┤
//!     │                          │                          └──> SelectionIndex
//!     ▼                          ▼                                 ▼
//!  Vec<Control>           Vec<ReferenceDocument>          Vec<SelectionRecord>
//! ```
//!
//! Every load is a full rebuild from the current files. Only a missing
//! directory aborts a load; unmatched or unreadable files are handed to the
//! [`LoadObserver`] and left out.
//!
//! ## Example
//!
//! ```no_run
//! use control_map_catalog::{CatalogConfig, ControlCatalog, LogObserver};
//!
//! let config = CatalogConfig::default();
//! let controls = ControlCatalog::load(&config.controls_source(), &mut LogObserver)?;
//! for control in controls.iter() {
//!     println!("{}", control.label());
//! }
//! # Ok::<(), control_map_catalog::CatalogError>(())
//! ```

mod config;
mod controls;
mod error;
mod filename;
mod ids;
mod observer;
mod references;
mod selection;
mod source;

pub use config::{
    CatalogConfig, SelectionOptions, DEFAULT_CONTROLS_DIR, DEFAULT_DOCUMENTS_DIR,
    DEFAULT_SELECTIONS_DIR, DEFAULT_TEMPLATE_FILE_NAME,
};
pub use controls::{locate_control_entry, Control, ControlCatalog};
pub use error::{CatalogError, FilenameError, Result, SkipReason};
pub use filename::{
    is_markdown, is_reserved_template, parse_control_filename, parse_document_filename, ControlFilename,
    MARKDOWN_EXTENSION,
};
pub use ids::{numeric_literal_cmp, ControlId, DocumentId};
pub use observer::{CatalogKind, LoadObserver, LogObserver, SkipLog, SkippedEntry, Tee};
pub use references::{extract_source_url, extract_title, ReferenceCatalog, ReferenceDocument};
pub use selection::{extract_cross_references, SelectionIndex, SelectionRecord};
pub use source::{EntrySource, FsDirectory, MemoryDirectory};
