//! Export of laid-out dialog graphs.
//!
//! This module joins a [`Graph`], its [`Layout`] and the flow colors into a
//! [`Diagram`], the document handed to renderers. It is the final stage of the
//! pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Plot
//!     ↓ structure
//! Graph
//!     ↓ layout
//! Layout
//!     ↓ export (this module)
//! Diagram JSON
//! ```

use log::debug;
use serde::Serialize;

use dialograph_core::{
    color::Color,
    geometry::{Point, Size},
    graph::{Graph, GraphEdge, NodeKind},
    identifier::Id,
};

use crate::{
    error::DialographError,
    layout::Layout,
    style::{FlowColors, Palette, color_for_flow},
};

/// A graph node with its position and flow color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramNode {
    id: Id,
    label: String,
    kind: NodeKind,
    flow: String,
    /// `None` for nodes the layout never reached.
    position: Option<Point>,
    color: Color,
}

impl DiagramNode {
    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn flow(&self) -> &str {
        &self.flow
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// A fully laid out dialog graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    edges: Vec<GraphEdge>,
    node_size: Size,
}

impl Diagram {
    /// Combines `graph` and `layout`, coloring flows from `palette` in node order.
    pub fn new(graph: &Graph, layout: &Layout, palette: &Palette) -> Self {
        let mut flow_colors = FlowColors::new();
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| DiagramNode {
                id: node.id().clone(),
                label: node.label().to_string(),
                kind: node.kind(),
                flow: node.flow().to_string(),
                position: layout.position(node.id().as_str()),
                color: color_for_flow(node.flow(), palette, &mut flow_colors),
            })
            .collect();
        debug!(flows_count = flow_colors.len(); "Assigned flow colors");

        Self {
            nodes,
            edges: graph.edges().to_vec(),
            node_size: layout.node_size(),
        }
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Serializes `diagram` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`DialographError::Export`] if serialization fails.
pub fn to_json(diagram: &Diagram) -> Result<String, DialographError> {
    serde_json::to_string_pretty(diagram).map_err(DialographError::Export)
}

#[cfg(test)]
mod tests {
    use dialograph_core::graph::GraphNode;

    use super::*;
    use crate::layout::get_layout;

    fn graph() -> Graph {
        Graph::new(
            vec![
                GraphNode::new("a", "start", NodeKind::Bot).with_flow("greeting"),
                GraphNode::new("t", "cnd.hi", NodeKind::User).with_flow("greeting"),
                GraphNode::new("b", "end", NodeKind::Bot).with_flow("farewell"),
                GraphNode::new("x", "island", NodeKind::Bot),
                GraphNode::new("y", "island", NodeKind::Bot),
            ],
            vec![
                GraphEdge::new("a", "t"),
                GraphEdge::new("t", "b"),
                GraphEdge::new("x", "y"),
                GraphEdge::new("y", "x"),
            ],
        )
    }

    #[test]
    fn test_flows_share_a_color() {
        let graph = graph();
        let diagram = Diagram::new(&graph, &get_layout(&graph), &Palette::default());

        let color = |id: &str| diagram.node(id).unwrap().color();
        assert_eq!(color("a"), color("t"));
        assert_ne!(color("a"), color("b"));
        assert_eq!(diagram.edges().len(), 4);
    }

    #[test]
    fn test_unplaced_nodes_serialize_null_position() {
        let graph = graph();
        let diagram = Diagram::new(&graph, &get_layout(&graph), &Palette::default());
        assert!(diagram.node("a").unwrap().position().is_some());

        let json: serde_json::Value = serde_json::from_str(&to_json(&diagram).unwrap()).unwrap();
        let nodes = json["nodes"].as_array().unwrap();
        assert!(nodes[0]["position"].is_object());
        assert!(nodes[3]["position"].is_null());
        assert_eq!(nodes[1]["kind"], "user");
        assert_eq!(json["edges"][0]["fromId"], "a");
        assert_eq!(json["nodeSize"]["width"], 160.0);
    }
}
