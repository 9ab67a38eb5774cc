use crate::assembler::GraphAssembler;
use crate::error::Result;
use crate::types::MappingGraph;
use control_map_catalog::{
    CatalogConfig, ControlCatalog, EntrySource, LoadObserver, ReferenceCatalog, SelectionIndex,
    SelectionOptions,
};

/// Everything derived from one pass over the three folders.
#[derive(Debug, Clone)]
pub struct MappingSnapshot {
    pub controls: ControlCatalog,
    pub documents: ReferenceCatalog,
    pub selections: SelectionIndex,
    pub graph: MappingGraph,
}

/// Load the configured folders and assemble the graph.
///
/// A missing folder aborts the whole build; skipped files only reach
/// `observer`.
pub fn build_snapshot(
    config: &CatalogConfig,
    observer: &mut dyn LoadObserver,
) -> Result<MappingSnapshot> {
    config.validate()?;
    build_snapshot_from_sources(
        &config.controls_source(),
        &config.documents_source(),
        &config.selections_source(),
        &config.selection,
        observer,
    )
}

/// Same as [`build_snapshot`] over arbitrary entry sources.
pub fn build_snapshot_from_sources(
    controls: &dyn EntrySource,
    documents: &dyn EntrySource,
    selections: &dyn EntrySource,
    options: &SelectionOptions,
    observer: &mut dyn LoadObserver,
) -> Result<MappingSnapshot> {
    let controls = ControlCatalog::load(controls, observer)?;
    let documents = ReferenceCatalog::load(documents, observer)?;
    let selections = SelectionIndex::load(selections, &documents.known_ids(), options, observer)?;

    let graph =
        GraphAssembler::new(controls.controls(), documents.documents(), selections.records())
            .assemble();

    Ok(MappingSnapshot {
        controls,
        documents,
        selections,
        graph,
    })
}
