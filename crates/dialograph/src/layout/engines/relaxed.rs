//! Relaxed layout engine.
//!
//! Ranks nodes by spring relaxation first, then packs subtrees with siblings
//! sorted by rank. Edge neighbors end up close to each other vertically and
//! nodes of the same flow drift together.

use log::debug;

use dialograph_core::graph::Graph;

use crate::layout::{
    Layout,
    adjacency::Adjacency,
    engines::{GraphEngine, collect_layout},
    packing::{self, Spacing},
    relax::{self, RelaxParams},
};

/// The relaxed layout engine
#[derive(Debug, Clone)]
pub struct Engine {
    spacing: Spacing,
    params: RelaxParams,
}

impl Engine {
    /// Create a new relaxed layout engine with the default stiffness
    pub fn new(spacing: Spacing) -> Self {
        Self {
            spacing,
            params: RelaxParams {
                edge_stiffness: 0.1,
                flow_stiffness: 0.01,
                iterations: 100,
                convergence_threshold: None,
            },
        }
    }

    /// Set the weight of edge tension
    pub fn set_edge_stiffness(&mut self, stiffness: f32) -> &mut Self {
        self.params.edge_stiffness = stiffness;
        self
    }

    /// Set the weight of same-flow tension
    pub fn set_flow_stiffness(&mut self, stiffness: f32) -> &mut Self {
        self.params.flow_stiffness = stiffness;
        self
    }

    /// Set the number of relaxation iterations
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.params.iterations = iterations;
        self
    }

    /// Set the early-stop threshold, `None` to always run every iteration
    pub fn set_convergence_threshold(&mut self, threshold: Option<f32>) -> &mut Self {
        self.params.convergence_threshold = threshold;
        self
    }
}

impl GraphEngine for Engine {
    fn calculate(&self, graph: &Graph) -> Layout {
        let adjacency = Adjacency::new(graph);
        let roots = adjacency.roots();
        debug!(
            nodes_count = adjacency.len(),
            roots_count = roots.len(),
            iterations = self.params.iterations;
            "Relaxing graph"
        );

        let ranks = relax::relax(graph, &adjacency, &roots, self.params);
        let slots = packing::pack(&adjacency, &roots, Some(&ranks), self.spacing);
        collect_layout(&adjacency, &slots, self.spacing.node_size)
    }
}
