//! Layout engine factory module
//!
//! Engines turn a [`Graph`] into a [`Layout`]. The [`EngineBuilder`] carries
//! the shared spacing and relaxation settings and hands out a configured
//! engine for the requested [`LayoutEngine`].

mod basic;
mod relaxed;

use indexmap::IndexMap;
use log::{debug, trace};

use dialograph_core::{
    geometry::Size,
    graph::Graph,
    identifier::Id,
};

use super::{
    Layout,
    adjacency::Adjacency,
    packing::{Slot, Spacing},
};
use crate::config::{LayoutConfig, LayoutEngine};

/// Trait defining the interface for graph layout engines.
pub trait GraphEngine {
    /// Calculate positions for every node reachable from a root of `graph`.
    ///
    /// Never fails: edges naming unknown nodes are ignored and a graph with
    /// no root starts from its smallest node id.
    fn calculate(&self, graph: &Graph) -> Layout;
}

/// Builder for creating and configuring layout engines.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    node_size: Size,
    column_gap: f32,
    row_gap: f32,
    edge_stiffness: f32,
    flow_stiffness: f32,
    iterations: usize,
    convergence_threshold: Option<f32>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl EngineBuilder {
    /// Create a new engine builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder carrying every setting of `config`.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            node_size: config.node_size(),
            column_gap: config.column_gap(),
            row_gap: config.row_gap(),
            edge_stiffness: config.edge_stiffness(),
            flow_stiffness: config.flow_stiffness(),
            iterations: config.iterations(),
            convergence_threshold: config.convergence_threshold(),
        }
    }

    /// Set the size reserved for every node
    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_size = size;
        self
    }

    /// Set the horizontal gap between columns
    pub fn with_column_gap(mut self, gap: f32) -> Self {
        self.column_gap = gap;
        self
    }

    /// Set the vertical gap between sibling subtrees
    pub fn with_row_gap(mut self, gap: f32) -> Self {
        self.row_gap = gap;
        self
    }

    /// Set the weight of edge tension
    pub fn with_edge_stiffness(mut self, stiffness: f32) -> Self {
        self.edge_stiffness = stiffness;
        self
    }

    /// Set the weight of same-flow tension
    pub fn with_flow_stiffness(mut self, stiffness: f32) -> Self {
        self.flow_stiffness = stiffness;
        self
    }

    /// Set the number of relaxation iterations
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Stop relaxing once no rank moves by more than `threshold`
    pub fn with_convergence_threshold(mut self, threshold: f32) -> Self {
        self.convergence_threshold = Some(threshold);
        self
    }

    /// Get an engine of the specified type with the configured options
    pub fn build(&self, engine_type: LayoutEngine) -> Box<dyn GraphEngine> {
        debug!(engine:? = engine_type; "Building layout engine");
        let spacing = Spacing {
            node_size: self.node_size,
            column_gap: self.column_gap,
            row_gap: self.row_gap,
        };
        match engine_type {
            LayoutEngine::Basic => Box::new(basic::Engine::new(spacing)),
            LayoutEngine::Relaxed => {
                let mut engine = relaxed::Engine::new(spacing);
                engine
                    .set_edge_stiffness(self.edge_stiffness)
                    .set_flow_stiffness(self.flow_stiffness)
                    .set_iterations(self.iterations)
                    .set_convergence_threshold(self.convergence_threshold);
                Box::new(engine)
            }
        }
    }
}

/// Collects placed slots into a [`Layout`], in graph node order.
fn collect_layout(adjacency: &Adjacency<'_>, slots: &[Slot], node_size: Size) -> Layout {
    let positions: IndexMap<Id, _> = slots
        .iter()
        .enumerate()
        .filter_map(|(idx, slot)| match slot {
            Slot::Placed(point) => Some((adjacency.id(idx).clone(), *point)),
            Slot::Empty | Slot::Pending => None,
        })
        .collect();

    let unplaced = adjacency.len() - positions.len();
    if unplaced > 0 {
        debug!(unplaced; "Nodes unreachable from any root were not laid out");
    }
    trace!(positions:? = positions; "Calculated layout");

    Layout::new(positions, node_size)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use dialograph_core::graph::{GraphEdge, GraphNode, NodeKind};

    use super::*;

    fn fan_out() -> Graph {
        Graph::new(
            vec![
                GraphNode::new("a", "a", NodeKind::Bot),
                GraphNode::new("b", "b", NodeKind::Bot),
                GraphNode::new("c", "c", NodeKind::Bot),
            ],
            vec![GraphEdge::new("a", "b"), GraphEdge::new("a", "c")],
        )
    }

    #[test]
    fn test_spacing_is_configurable() {
        let layout = EngineBuilder::new()
            .with_node_size(Size::new(100.0, 50.0))
            .with_column_gap(20.0)
            .with_row_gap(10.0)
            .build(LayoutEngine::Basic)
            .calculate(&fan_out());

        let b = layout.position("b").unwrap();
        let c = layout.position("c").unwrap();
        assert_approx_eq!(f32, b.x(), 120.0);
        assert_approx_eq!(f32, b.y(), 10.0);
        assert_approx_eq!(f32, c.y(), 70.0);
        assert_approx_eq!(f32, layout.node_size().width(), 100.0);
    }

    #[test]
    fn test_from_config_matches_defaults() {
        let graph = fan_out();
        let from_config = EngineBuilder::from_config(&LayoutConfig::default())
            .build(LayoutEngine::Relaxed)
            .calculate(&graph);
        assert_eq!(from_config, EngineBuilder::new().build(LayoutEngine::Relaxed).calculate(&graph));
    }

    #[test]
    fn test_basic_engine_handles_long_chains() {
        let ids: Vec<String> = (0..5_000).map(|idx| format!("n{idx:04}")).collect();
        let nodes = ids
            .iter()
            .map(|id| GraphNode::new(id.as_str(), "step", NodeKind::Bot))
            .collect();
        let edges = ids
            .windows(2)
            .map(|pair| GraphEdge::new(pair[0].as_str(), pair[1].as_str()))
            .collect();

        let layout = EngineBuilder::new()
            .build(LayoutEngine::Basic)
            .calculate(&Graph::new(nodes, edges));
        assert_eq!(layout.len(), 5_000);
        assert_approx_eq!(f32, layout.position("n4999").unwrap().x(), 4_999.0 * 260.0);
    }

    #[test]
    fn test_relaxation_settings_reach_engine() {
        // Without iterations the relaxed engine keeps edge order, like basic.
        let graph = fan_out();
        let frozen = EngineBuilder::new()
            .with_iterations(0)
            .build(LayoutEngine::Relaxed)
            .calculate(&graph);
        let basic = EngineBuilder::new().build(LayoutEngine::Basic).calculate(&graph);
        assert_eq!(frozen, basic);

        let converged = EngineBuilder::new()
            .with_convergence_threshold(f32::MAX)
            .build(LayoutEngine::Relaxed)
            .calculate(&graph);
        assert_eq!(converged.len(), 3);
    }
}
