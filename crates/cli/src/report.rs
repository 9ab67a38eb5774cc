use anyhow::Result;
use control_map_catalog::SkipLog;
use control_map_graph::MappingSnapshot;

pub fn render_coverage_report(snapshot: &MappingSnapshot, skips: &SkipLog) -> Result<String> {
    let graph = &snapshot.graph;
    let summary = graph.summary();

    let mut md = String::new();
    md.push_str("# Control map coverage\n\n");
    md.push_str(&format!("- Controls: `{}`\n", summary.controls));
    md.push_str(&format!("- Documents: `{}`\n", summary.documents));
    md.push_str(&format!("- Selection reports: `{}`\n", snapshot.selections.len()));
    md.push_str(&format!("- Relevance edges: `{}`\n", summary.edges));
    md.push_str(&format!("- Skipped files: `{}`\n\n", skips.warning_count()));

    md.push_str("## Controls\n\n");
    md.push_str("| control | documents |\n");
    md.push_str("|---|---|\n");
    for control in snapshot.controls.iter() {
        let documents = graph.documents_for_control(control.id.as_str())?;
        let cell = if documents.is_empty() {
            "n/a".to_string()
        } else {
            documents
                .iter()
                .map(|doc| format!("{} ({})", escape_cell(&doc.label), doc.id))
                .collect::<Vec<_>>()
                .join("<br>")
        };
        md.push_str(&format!(
            "| `{}` {} | {} |\n",
            control.id,
            escape_cell(&control.name),
            cell
        ));
    }
    md.push('\n');

    if !summary.unreferenced_documents.is_empty() {
        md.push_str("## Unreferenced documents\n\n");
        for id in &summary.unreferenced_documents {
            let name = snapshot
                .documents
                .get(id)
                .map_or(id.as_str(), |doc| doc.name.as_str());
            md.push_str(&format!("- `{id}` {}\n", escape_cell(name)));
        }
        md.push('\n');
    }

    if !skips.is_clean() {
        md.push_str("## Skipped files\n\n");
        for skipped in skips.warnings() {
            md.push_str(&format!("- {skipped}\n"));
        }
        md.push('\n');
    }

    Ok(md)
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
