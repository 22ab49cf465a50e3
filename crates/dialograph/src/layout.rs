//! Layout of display graphs.
//!
//! Assigns every node reachable from a root a top-left position. Nodes form
//! columns by placement depth, left to right, and within a column are stacked
//! top to bottom so that sibling subtrees never overlap.
//!
//! # Pipeline Position
//!
//! ```text
//! Plot
//!     ↓ structure
//! Graph
//!     ↓ layout (this module)
//! Layout
//!     ↓ export
//! Diagram
//! ```
//!
//! # Re-exports
//!
//! - [`EngineBuilder`] - Builder for creating and configuring layout engines
//! - [`GraphEngine`] - The interface every engine implements

mod adjacency;
mod engines;
mod packing;
mod relax;

use indexmap::IndexMap;
use serde::Serialize;

use dialograph_core::{
    geometry::{Bounds, Point, Size},
    graph::Graph,
    identifier::Id,
};

use crate::config::LayoutEngine;

pub use engines::{EngineBuilder, GraphEngine};

/// Node positions produced by a layout engine.
///
/// Nodes that were never reached from a root have no entry; callers must
/// treat a missing position as "not laid out", never as the origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    positions: IndexMap<Id, Point>,
    node_size: Size,
}

impl Layout {
    pub(crate) fn new(positions: IndexMap<Id, Point>, node_size: Size) -> Self {
        Self {
            positions,
            node_size,
        }
    }

    /// Top-left corner of the node `id`.
    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Bounding box of the node `id`.
    pub fn bounds(&self, id: &str) -> Option<Bounds> {
        self.position(id)
            .map(|position| position.to_bounds(self.node_size))
    }

    /// All positions, in graph node order.
    pub fn positions(&self) -> impl Iterator<Item = (&Id, Point)> {
        self.positions.iter().map(|(id, point)| (id, *point))
    }

    /// Size reserved for every node.
    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Lays out `graph` with the relaxed engine and its default parameters.
///
/// # Examples
///
/// ```
/// use dialograph::get_layout;
/// use dialograph_core::graph::{Graph, GraphEdge, GraphNode, NodeKind};
///
/// let graph = Graph::new(
///     vec![
///         GraphNode::new("a", "start", NodeKind::Bot),
///         GraphNode::new("b", "next", NodeKind::Bot),
///     ],
///     vec![GraphEdge::new("a", "b")],
/// );
///
/// let layout = get_layout(&graph);
/// assert_eq!(layout.position("a").map(|p| p.x()), Some(0.0));
/// assert_eq!(layout.position("b").map(|p| p.x()), Some(260.0));
/// ```
pub fn get_layout(graph: &Graph) -> Layout {
    EngineBuilder::new()
        .build(LayoutEngine::Relaxed)
        .calculate(graph)
}
