use crate::error::{GraphError, Result};
use crate::types::{GraphNode, MappingGraph, NodeKind};
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use serde::Serialize;

/// Node and coverage counts for a control map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub controls: usize,
    pub documents: usize,
    pub edges: usize,
    /// Control ids with no relevant document
    pub unmapped_controls: Vec<String>,
    /// Document ids no control points at
    pub unreferenced_documents: Vec<String>,
}

impl MappingGraph {
    /// Documents linked from a control, in node order.
    pub fn documents_for_control(&self, control_id: &str) -> Result<Vec<&GraphNode>> {
        self.neighbours(control_id, Direction::Outgoing)
    }

    /// Controls linking to a document, in node order.
    pub fn controls_for_document(&self, document_id: &str) -> Result<Vec<&GraphNode>> {
        self.neighbours(document_id, Direction::Incoming)
    }

    pub fn unmapped_controls(&self) -> Vec<&GraphNode> {
        self.isolated(NodeKind::Control, Direction::Outgoing)
    }

    pub fn unreferenced_documents(&self) -> Vec<&GraphNode> {
        self.isolated(NodeKind::Document, Direction::Incoming)
    }

    pub fn summary(&self) -> GraphSummary {
        let count = |kind: NodeKind| self.nodes.iter().filter(|n| n.kind == kind).count();
        let ids = |nodes: Vec<&GraphNode>| -> Vec<String> {
            nodes.into_iter().map(|n| n.id.clone()).collect()
        };
        GraphSummary {
            controls: count(NodeKind::Control),
            documents: count(NodeKind::Document),
            edges: self.edge_count(),
            unmapped_controls: ids(self.unmapped_controls()),
            unreferenced_documents: ids(self.unreferenced_documents()),
        }
    }

    fn neighbours(&self, id: &str, direction: Direction) -> Result<Vec<&GraphNode>> {
        let idx = self
            .find_node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;

        // petgraph yields neighbours newest-first; sort back into node order.
        let mut positions: Vec<usize> = self
            .graph
            .neighbors_directed(idx, direction)
            .filter_map(|n| self.graph.node_weight(n).copied())
            .collect();
        positions.sort_unstable();
        positions.dedup();
        Ok(positions.into_iter().map(|p| &self.nodes[p]).collect())
    }

    fn isolated(&self, kind: NodeKind, direction: Direction) -> Vec<&GraphNode> {
        self.graph
            .node_indices()
            .filter(|&idx| self.is_indexed(idx))
            .filter(|&idx| self.graph.neighbors_directed(idx, direction).next().is_none())
            .filter_map(|idx| self.get_node(idx))
            .filter(|node| node.kind == kind)
            .collect()
    }

    /// Duplicate ids get petgraph nodes too; only the indexed one carries edges.
    fn is_indexed(&self, idx: NodeIndex) -> bool {
        self.get_node(idx)
            .and_then(|node| self.node_index.get(&node.id))
            .is_some_and(|&indexed| indexed == idx)
    }
}
