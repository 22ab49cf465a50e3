//! Display graph types.
//!
//! A [`Graph`] is the flat node/edge view of a plot that the layout engines
//! and renderers consume. It carries no references back into the plot.

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// Flow tag for nodes that belong to no flow.
pub const NO_FLOW: &str = "noflow";

/// Label for response nodes without a name.
pub const NO_NAME: &str = "noname";

/// Label for conditions that cannot be resolved to a definition.
pub const UNKNOWN: &str = "unknown";

/// Which side of the conversation a graph node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A bot response (a plot node).
    Bot,
    /// A user turn (the condition of a transition).
    User,
}

/// A vertex of the display graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    id: Id,
    label: String,
    kind: NodeKind,
    #[serde(default = "no_flow")]
    flow: String,
}

fn no_flow() -> String {
    NO_FLOW.to_string()
}

impl GraphNode {
    /// Creates a node outside of any flow.
    pub fn new(id: impl Into<Id>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            flow: no_flow(),
        }
    }

    /// Sets the flow tag.
    pub fn with_flow(mut self, flow: impl Into<String>) -> Self {
        self.flow = flow.into();
        self
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Flow tag, [`NO_FLOW`] when the node belongs to no flow.
    pub fn flow(&self) -> &str {
        &self.flow
    }
}

/// A directed edge of the display graph, identified by its ordered endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(rename = "fromId")]
    from: Id,
    #[serde(rename = "toId")]
    to: Id,
}

impl GraphEdge {
    pub fn new(from: impl Into<Id>, to: impl Into<Id>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Edge source (`fromId` on the wire).
    pub fn source(&self) -> &Id {
        &self.from
    }

    /// Edge target (`toId` on the wire).
    pub fn target(&self) -> &Id {
        &self.to
    }
}

/// The display graph.
///
/// The builder guarantees unique node ids, unique edges and that every edge
/// endpoint names a node. Graphs assembled by hand may break the last rule;
/// layout engines ignore such edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns true if an edge `from -> to` exists.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.from == from && edge.to == to)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
