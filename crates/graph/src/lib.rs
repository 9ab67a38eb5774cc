//! # Control Map Graph
//!
//! Turns the loaded catalogs into the node/edge graph the browser view draws.
//!
//! ## Architecture
//!
//! ```text
//! ControlCatalog ─┐
//! ReferenceCatalog ┼──> GraphAssembler ──> MappingGraph
//! SelectionIndex ─┘                          ├─ nodes / edges (assembly order)
//!                                            ├─ petgraph index (neighbour queries)
//!                                            └─ exports (plain JSON, Cytoscape)
//! ```
//!
//! Nodes: one per control (`"<id> <name>"`) and one per reference document
//! (its title). Edges: one per relevant document of each selection record.
//! Rebuilding over unchanged files produces identical output.

mod assembler;
mod error;
mod export;
mod graph;
mod snapshot;
mod types;

pub use assembler::GraphAssembler;
pub use error::{GraphError, Result};
pub use export::ExportFormat;
pub use graph::GraphSummary;
pub use snapshot::{build_snapshot, build_snapshot_from_sources, MappingSnapshot};
pub use types::{GraphEdge, GraphNode, MappingGraph, NodeKind};
