use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Control,
    Document,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Control => "Control",
            NodeKind::Document => "Document",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node in the control map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
}

/// Relevance edge from a control to a reference document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
}

/// Assembled control map.
///
/// `nodes` and `edges` keep assembly order and are what exporters emit. The
/// petgraph index mirrors them for neighbourhood queries; each petgraph node
/// weight is the position of its `GraphNode` in `nodes`.
#[derive(Debug, Clone, Default)]
pub struct MappingGraph {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) edges: Vec<GraphEdge>,
    pub(crate) graph: DiGraph<usize, ()>,
    pub(crate) node_index: HashMap<String, NodeIndex>,
}

impl MappingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. The first node registered under an id wins the index
    /// slot; later duplicates are still emitted.
    pub fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        let position = self.nodes.len();
        let idx = self.graph.add_node(position);
        self.node_index.entry(node.id.clone()).or_insert(idx);
        self.nodes.push(node);
        idx
    }

    /// Add an edge. Endpoints missing from the node set are emitted but not
    /// indexed for queries.
    pub fn add_edge(&mut self, edge: GraphEdge) {
        match (
            self.node_index.get(&edge.source_id),
            self.node_index.get(&edge.target_id),
        ) {
            (Some(&from), Some(&to)) => {
                self.graph.add_edge(from, to, ());
            }
            _ => log::debug!(
                "Edge {} -> {} has an endpoint outside the node set",
                edge.source_id,
                edge.target_id
            ),
        }
        self.edges.push(edge);
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn find_node(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn get_node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        self.graph
            .node_weight(idx)
            .and_then(|&position| self.nodes.get(position))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
