//! Basic layout engine.
//!
//! Packs subtrees in edge declaration order without any reordering.

use log::debug;

use dialograph_core::graph::Graph;

use crate::layout::{
    Layout,
    adjacency::Adjacency,
    engines::{GraphEngine, collect_layout},
    packing::{self, Spacing},
};

/// The basic layout engine
#[derive(Debug, Clone)]
pub struct Engine {
    spacing: Spacing,
}

impl Engine {
    /// Create a new basic layout engine
    pub fn new(spacing: Spacing) -> Self {
        Self { spacing }
    }
}

impl GraphEngine for Engine {
    fn calculate(&self, graph: &Graph) -> Layout {
        let adjacency = Adjacency::new(graph);
        let roots = adjacency.roots();
        debug!(nodes_count = adjacency.len(), roots_count = roots.len(); "Packing graph");

        let slots = packing::pack(&adjacency, &roots, None, self.spacing);
        collect_layout(&adjacency, &slots, self.spacing.node_size)
    }
}
