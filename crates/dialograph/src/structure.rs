//! Display graph derivation.
//!
//! Turns a [`Plot`] into a [`Graph`] of BOT nodes (plot nodes) and USER nodes
//! (one per transition, labelled with the resolved condition), connected as
//! `node -> transition -> target`.
//!
//! Derivation never fails. Transitions whose target is not a known node are
//! dropped, conditions that cannot be resolved are labelled
//! [`UNKNOWN`](dialograph_core::graph::UNKNOWN). Record ids are assumed unique
//! across the plot; on a collision the first emitted graph node wins.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use dialograph_core::{
    graph::{Graph, GraphEdge, GraphNode, NO_FLOW, NO_NAME, NodeKind},
    identifier::{Id, NodeId, TransitionId},
    plot::{Node, NodeType, Plot},
};

use crate::{config::GlobalTransitions, resolve::resolve_condition_label};

/// Derives the display graph of `plot` with GLOBAL nodes omitted.
///
/// # Examples
///
/// ```
/// use dialograph::plot_to_graph;
/// use dialograph_core::plot::{Node, NodeType, Plot, Transition};
///
/// let plot = Plot::default()
///     .with_node("id#nd_a", Node::new(NodeType::Regular).with_transition("id#tr_1"))
///     .with_node("id#nd_b", Node::new(NodeType::Regular))
///     .with_transition("id#tr_1", Transition::new("id#nd_b"));
///
/// let graph = plot_to_graph(&plot);
/// assert_eq!(graph.nodes().len(), 3);
/// assert!(graph.has_edge("id#nd_a", "id#tr_1"));
/// assert!(graph.has_edge("id#tr_1", "id#nd_b"));
/// ```
pub fn plot_to_graph(plot: &Plot) -> Graph {
    GraphBuilder::new(plot).build()
}

/// A GLOBAL transition whose target resolved to a known node.
#[derive(Debug)]
struct GlobalTransition<'p> {
    id: &'p TransitionId,
    target: (&'p NodeId, &'p Node),
    label: &'p str,
    flow: &'p str,
}

/// Incremental builder behind [`plot_to_graph`].
#[derive(Debug)]
pub struct GraphBuilder<'p> {
    plot: &'p Plot,
    global_transitions: GlobalTransitions,
    flows: HashMap<&'p str, &'p str>,
    nodes: IndexMap<Id, GraphNode>,
    edges: IndexSet<GraphEdge>,
    // (source, target, label) -> transition whose USER node stands for all of them
    conditions: HashMap<(&'p str, &'p str, &'p str), &'p TransitionId>,
}

impl<'p> GraphBuilder<'p> {
    /// Create a builder over `plot` with default settings.
    pub fn new(plot: &'p Plot) -> Self {
        let mut flows = HashMap::new();
        for (_, flow) in plot.flows() {
            for member in flow.nodes() {
                flows.entry(member.as_str()).or_insert(flow.name());
            }
        }

        Self {
            plot,
            global_transitions: GlobalTransitions::default(),
            flows,
            nodes: IndexMap::new(),
            edges: IndexSet::new(),
            conditions: HashMap::new(),
        }
    }

    /// Set how transitions of GLOBAL nodes are handled.
    pub fn with_global_transitions(mut self, mode: GlobalTransitions) -> Self {
        self.global_transitions = mode;
        self
    }

    /// Consume the builder and derive the graph.
    pub fn build(mut self) -> Graph {
        let globals = match self.global_transitions {
            GlobalTransitions::Omit => Vec::new(),
            GlobalTransitions::FanOut => self.collect_global_transitions(),
        };

        let plot = self.plot;
        for (node_id, node) in plot.nodes() {
            if node.kind() != NodeType::Regular || node.transitions().is_empty() {
                continue;
            }

            self.add_bot_node(node_id, node);
            for trans_id in node.transitions() {
                self.add_transition(node_id, trans_id);
            }
            for global in &globals {
                self.add_global_transition(node_id, global);
            }
        }

        debug!(
            nodes_count = self.nodes.len(),
            edges_count = self.edges.len();
            "Graph derived from plot"
        );

        Graph::new(
            self.nodes.into_values().collect(),
            self.edges.into_iter().collect(),
        )
    }

    fn flow_of(&self, node_id: &str) -> &'p str {
        self.flows.get(node_id).copied().unwrap_or(NO_FLOW)
    }

    /// Look up a transition and its target, if the target is a known node.
    fn resolve_target(&self, trans_id: &TransitionId) -> Option<(&'p NodeId, &'p Node, &'p str)> {
        let plot = self.plot;
        let Some(transition) = plot.transition(trans_id.as_str()) else {
            debug!(transition_id = trans_id.as_str(); "Dropping transition without a record");
            return None;
        };
        let target = transition
            .label()
            .as_node()
            .and_then(|target_id| plot.node(target_id.as_str()).map(|node| (target_id, node)));
        let Some((target_id, target)) = target else {
            debug!(
                transition_id = trans_id.as_str(),
                label = transition.label().as_str();
                "Dropping transition to an unknown node"
            );
            return None;
        };
        let label = resolve_condition_label(transition.condition(), plot);
        Some((target_id, target, label))
    }

    fn add_bot_node(&mut self, node_id: &NodeId, node: &Node) {
        if self.nodes.contains_key(node_id.as_str()) {
            return;
        }
        let graph_node = GraphNode::new(node_id, node.name().unwrap_or(NO_NAME), NodeKind::Bot)
            .with_flow(self.flow_of(node_id.as_str()));
        self.nodes.insert(Id::from(node_id), graph_node);
    }

    fn add_user_node(&mut self, trans_id: &TransitionId, label: &str, flow: &str) {
        if self.nodes.contains_key(trans_id.as_str()) {
            return;
        }
        let graph_node = GraphNode::new(trans_id, label, NodeKind::User).with_flow(flow);
        self.nodes.insert(Id::from(trans_id), graph_node);
    }

    fn add_edge(&mut self, from: impl Into<Id>, to: impl Into<Id>) {
        self.edges.insert(GraphEdge::new(from, to));
    }

    fn add_transition(&mut self, source_id: &'p NodeId, trans_id: &'p TransitionId) {
        let Some((target_id, target, label)) = self.resolve_target(trans_id) else {
            return;
        };

        let key = (source_id.as_str(), target_id.as_str(), label);
        if let Some(existing) = self.conditions.get(&key) {
            trace!(
                transition_id = trans_id.as_str(),
                merged_into = existing.as_str();
                "Collapsing duplicate transition"
            );
            return;
        }
        self.conditions.insert(key, trans_id);

        let flow = self.flow_of(source_id.as_str());
        self.add_edge(source_id, trans_id);
        self.add_user_node(trans_id, label, flow);
        self.add_bot_node(target_id, target);
        self.add_edge(trans_id, target_id);
    }

    fn collect_global_transitions(&self) -> Vec<GlobalTransition<'p>> {
        let plot = self.plot;
        plot.nodes()
            .filter(|(_, node)| node.kind() == NodeType::Global)
            .flat_map(|(node_id, node)| {
                let flow = self.flow_of(node_id.as_str());
                node.transitions().iter().filter_map(move |trans_id| {
                    let (target_id, target, label) = self.resolve_target(trans_id)?;
                    Some(GlobalTransition {
                        id: trans_id,
                        target: (target_id, target),
                        label,
                        flow,
                    })
                })
            })
            .collect()
    }

    fn add_global_transition(&mut self, source_id: &NodeId, global: &GlobalTransition<'p>) {
        let (target_id, target) = global.target;
        if target_id == source_id {
            return;
        }
        self.add_edge(source_id, global.id);
        self.add_user_node(global.id, global.label, global.flow);
        self.add_bot_node(target_id, target);
        self.add_edge(global.id, target_id);
    }
}
