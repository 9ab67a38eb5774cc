use crate::types::{GraphEdge, GraphNode, MappingGraph, NodeKind};
use control_map_catalog::{Control, ReferenceDocument, SelectionRecord};

/// Combines the three loaded collections into one node/edge graph.
///
/// Pure and total: inputs are already validated, so assembly cannot fail.
/// Output order follows input order (controls, then documents, then one edge
/// per relevant document of each selection record).
pub struct GraphAssembler<'a> {
    controls: &'a [Control],
    documents: &'a [ReferenceDocument],
    selections: &'a [SelectionRecord],
}

impl<'a> GraphAssembler<'a> {
    pub fn new(
        controls: &'a [Control],
        documents: &'a [ReferenceDocument],
        selections: &'a [SelectionRecord],
    ) -> Self {
        Self {
            controls,
            documents,
            selections,
        }
    }

    pub fn assemble(&self) -> MappingGraph {
        let mut graph = MappingGraph::new();

        for control in self.controls {
            graph.add_node(GraphNode {
                id: control.id.to_string(),
                label: control.label(),
                kind: NodeKind::Control,
            });
        }

        for document in self.documents {
            graph.add_node(GraphNode {
                id: document.id.to_string(),
                label: document.name.clone(),
                kind: NodeKind::Document,
            });
        }

        for record in self.selections {
            for document_id in &record.relevant_document_ids {
                graph.add_edge(GraphEdge {
                    source_id: record.control_id.to_string(),
                    target_id: document_id.to_string(),
                });
            }
        }

        log::info!(
            "Assembled graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}
