use crate::report::render_coverage_report;
use crate::OutputOptions;
use anyhow::{bail, Context, Result};
use control_map_catalog::{
    locate_control_entry, CatalogConfig, ControlCatalog, LogObserver, ReferenceCatalog,
    SelectionIndex, SkipLog, Tee,
};
use control_map_graph::{build_snapshot, ExportFormat, GraphSummary, MappingSnapshot};
use serde::Serialize;

#[derive(Serialize)]
struct ControlOutput<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
}

#[derive(Serialize)]
struct DocumentOutput<'a> {
    id: &'a str,
    name: &'a str,
    source_url: &'a str,
}

#[derive(Serialize)]
struct SummaryOutput {
    #[serde(flatten)]
    graph: GraphSummary,
    selections: usize,
    skipped: Vec<String>,
}

/// Runs a load with both logging and recording observers, then applies
/// `--strict`.
fn load_with<T>(
    output: &OutputOptions,
    load: impl FnOnce(&mut Tee<'_, LogObserver, SkipLog>) -> Result<T>,
) -> Result<(T, SkipLog)> {
    let mut logger = LogObserver;
    let mut skips = SkipLog::new();
    let value = load(&mut Tee::new(&mut logger, &mut skips))?;

    if output.strict && !skips.is_clean() {
        let details: Vec<String> = skips.warnings().map(ToString::to_string).collect();
        bail!(
            "{} file(s) skipped in strict mode:\n{}",
            details.len(),
            details.join("\n")
        );
    }
    Ok((value, skips))
}

fn load_snapshot(
    config: &CatalogConfig,
    output: &OutputOptions,
) -> Result<(MappingSnapshot, SkipLog)> {
    load_with(output, |observer| {
        build_snapshot(config, observer).context("Failed to build control map")
    })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

pub(crate) fn run_graph(
    config: &CatalogConfig,
    output: &OutputOptions,
    format: ExportFormat,
) -> Result<String> {
    let (snapshot, _) = load_snapshot(config, output)?;
    Ok(snapshot.graph.render(format, output.pretty)?)
}

pub(crate) fn run_controls(
    config: &CatalogConfig,
    output: &OutputOptions,
    with_content: bool,
) -> Result<String> {
    let (controls, _) = load_with(output, |observer| {
        ControlCatalog::load(&config.controls_source(), observer)
            .context("Failed to load controls")
    })?;
    let rows: Vec<ControlOutput> = controls
        .iter()
        .map(|control| ControlOutput {
            id: control.id.as_str(),
            name: &control.name,
            content: with_content.then_some(control.content.as_str()),
        })
        .collect();
    to_json(&rows, output.pretty)
}

pub(crate) fn run_documents(config: &CatalogConfig, output: &OutputOptions) -> Result<String> {
    let (documents, _) = load_with(output, |observer| {
        ReferenceCatalog::load(&config.documents_source(), observer)
            .context("Failed to load reference documents")
    })?;
    let rows: Vec<DocumentOutput> = documents
        .iter()
        .map(|doc| DocumentOutput {
            id: doc.id.as_str(),
            name: &doc.name,
            source_url: &doc.source_url,
        })
        .collect();
    to_json(&rows, output.pretty)
}

pub(crate) fn run_selections(config: &CatalogConfig, output: &OutputOptions) -> Result<String> {
    let (selections, _) = load_with(output, |observer| {
        let documents = ReferenceCatalog::load(&config.documents_source(), observer)
            .context("Failed to load reference documents")?;
        SelectionIndex::load(
            &config.selections_source(),
            &documents.known_ids(),
            &config.selection,
            observer,
        )
        .context("Failed to load selection reports")
    })?;
    to_json(&selections.records(), output.pretty)
}

pub(crate) fn run_locate(config: &CatalogConfig, id: &str) -> Result<String> {
    let path = locate_control_entry(&config.controls_source(), id)
        .with_context(|| format!("Failed to locate control {id}"))?;
    Ok(path.display().to_string())
}

pub(crate) fn run_summary(config: &CatalogConfig, output: &OutputOptions) -> Result<String> {
    let (snapshot, skips) = load_snapshot(config, output)?;
    let summary = SummaryOutput {
        graph: snapshot.graph.summary(),
        selections: snapshot.selections.len(),
        skipped: skips.warnings().map(ToString::to_string).collect(),
    };
    to_json(&summary, output.pretty)
}

pub(crate) fn run_report(config: &CatalogConfig, output: &OutputOptions) -> Result<String> {
    let (snapshot, skips) = load_snapshot(config, output)?;
    render_coverage_report(&snapshot, &skips)
}
