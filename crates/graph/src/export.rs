//! Serialized forms handed to the visualization front end.

use crate::error::Result;
use crate::types::{GraphEdge, GraphNode, MappingGraph, NodeKind};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// `{"nodes": [...], "edges": [...]}`
    #[default]
    Plain,
    /// Cytoscape elements array
    Cytoscape,
}

#[derive(Serialize)]
struct PlainGraph<'a> {
    nodes: &'a [GraphNode],
    edges: &'a [GraphEdge],
}

impl MappingGraph {
    /// Cytoscape elements: control nodes, document nodes, then edges.
    ///
    /// Control nodes carry their class inside `data`, document nodes beside
    /// it, matching the stylesheet the front end ships with.
    pub fn cytoscape_elements(&self) -> Vec<Value> {
        let nodes = self.nodes.iter().map(|node| match node.kind {
            NodeKind::Control => json!({
                "data": {
                    "id": node.id,
                    "label": node.label,
                    "classes": node.kind.as_str(),
                }
            }),
            NodeKind::Document => json!({
                "data": { "id": node.id, "label": node.label },
                "classes": node.kind.as_str(),
            }),
        });
        let edges = self.edges.iter().map(|edge| {
            json!({
                "data": { "source": edge.source_id, "target": edge.target_id }
            })
        });
        nodes.chain(edges).collect()
    }

    pub fn to_json_value(&self, format: ExportFormat) -> Result<Value> {
        Ok(match format {
            ExportFormat::Plain => serde_json::to_value(PlainGraph {
                nodes: &self.nodes,
                edges: &self.edges,
            })?,
            ExportFormat::Cytoscape => Value::Array(self.cytoscape_elements()),
        })
    }

    pub fn render(&self, format: ExportFormat, pretty: bool) -> Result<String> {
        let value = self.to_json_value(format)?;
        let text = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }
}
