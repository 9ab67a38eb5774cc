//! Injected reporting for batch loads.
//!
//! Loaders never print. Every skipped entry and every finished batch is handed
//! to a [`LoadObserver`]; callers pick whether that means logging, recording,
//! or both.

use crate::error::SkipReason;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which loader produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Controls,
    Documents,
    Selections,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Controls => "controls",
            CatalogKind::Documents => "documents",
            CatalogKind::Selections => "selections",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry left out of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub catalog: CatalogKind,
    pub location: PathBuf,
    pub file_name: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: skipped '{}' in {}: {}",
            self.catalog,
            self.file_name,
            self.location.display(),
            self.reason
        )
    }
}

pub(crate) fn report_skip(
    observer: &mut dyn LoadObserver,
    catalog: CatalogKind,
    location: &Path,
    file_name: &str,
    reason: SkipReason,
) {
    observer.on_skip(&SkippedEntry {
        catalog,
        location: location.to_path_buf(),
        file_name: file_name.to_string(),
        reason,
    });
}

pub trait LoadObserver {
    fn on_skip(&mut self, skipped: &SkippedEntry);

    fn on_loaded(&mut self, _catalog: CatalogKind, _count: usize) {}
}

/// Forwards events to the `log` facade.
///
/// Skips that are not warnings (reserved template, non-markdown files) are
/// logged at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_skip(&mut self, skipped: &SkippedEntry) {
        if skipped.reason.is_warning() {
            log::warn!("{skipped}");
        } else {
            log::debug!("{skipped}");
        }
    }

    fn on_loaded(&mut self, catalog: CatalogKind, count: usize) {
        log::info!("Loaded {count} {catalog}");
    }
}

/// Records every skip for later inspection.
#[derive(Debug, Default, Clone)]
pub struct SkipLog {
    entries: Vec<SkippedEntry>,
    loaded: Vec<(CatalogKind, usize)>,
}

impl SkipLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SkippedEntry] {
        &self.entries
    }

    /// Skips that indicate a data problem.
    pub fn warnings(&self) -> impl Iterator<Item = &SkippedEntry> {
        self.entries.iter().filter(|entry| entry.reason.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn is_clean(&self) -> bool {
        self.warning_count() == 0
    }

    /// Record counts reported by `on_loaded`, in load order.
    pub fn loaded(&self) -> &[(CatalogKind, usize)] {
        &self.loaded
    }
}

impl LoadObserver for SkipLog {
    fn on_skip(&mut self, skipped: &SkippedEntry) {
        self.entries.push(skipped.clone());
    }

    fn on_loaded(&mut self, catalog: CatalogKind, count: usize) {
        self.loaded.push((catalog, count));
    }
}

/// Fans events out to two observers.
pub struct Tee<'a, A: ?Sized, B: ?Sized> {
    first: &'a mut A,
    second: &'a mut B,
}

impl<'a, A: LoadObserver + ?Sized, B: LoadObserver + ?Sized> Tee<'a, A, B> {
    pub fn new(first: &'a mut A, second: &'a mut B) -> Self {
        Self { first, second }
    }
}

impl<A: LoadObserver + ?Sized, B: LoadObserver + ?Sized> LoadObserver for Tee<'_, A, B> {
    fn on_skip(&mut self, skipped: &SkippedEntry) {
        self.first.on_skip(skipped);
        self.second.on_skip(skipped);
    }

    fn on_loaded(&mut self, catalog: CatalogKind, count: usize) {
        self.first.on_loaded(catalog, count);
        self.second.on_loaded(catalog, count);
    }
}
