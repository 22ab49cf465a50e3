//! The parsed dialog-flow plot.
//!
//! A [`Plot`] is the declarative flow description produced by the external
//! script parser: a set of id-keyed record tables that reference each other by
//! id only. All tables are ordered by their position in the source document so
//! that anything derived from a plot is deterministic.
//!
//! # Example
//!
//! ```
//! use dialograph_core::plot::{Node, NodeType, Plot, Transition};
//!
//! let plot = Plot::default()
//!     .with_node("id#nd_start", Node::new(NodeType::Regular).with_name("start").with_transition("id#tr_1"))
//!     .with_node("id#nd_end", Node::new(NodeType::Regular).with_name("end"))
//!     .with_transition("id#tr_1", Transition::new("id#nd_end"));
//!
//! assert_eq!(plot.nodes().count(), 2);
//! assert_eq!(plot.node("id#nd_start").and_then(Node::name), Some("start"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::identifier::{DefinitionId, FlowId, LinkId, NodeId, Ref, TransitionId};

/// Role a plot node plays in the dialog script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Transitions apply from every node of the script.
    Global,
    /// Transitions apply from every node of the enclosing flow.
    Local,
    /// An ordinary response node.
    Regular,
}

/// A `nodes` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    kind: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    transitions: Vec<TransitionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<Ref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    processing: Option<Ref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    misc: Option<Ref>,
}

impl Node {
    /// Creates an unnamed node without transitions.
    pub fn new(kind: NodeType) -> Self {
        Self {
            kind,
            name: None,
            transitions: Vec::new(),
            response: None,
            processing: None,
            misc: None,
        }
    }

    /// Sets the node's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a transition id to the node.
    pub fn with_transition(mut self, id: impl Into<TransitionId>) -> Self {
        self.transitions.push(id.into());
        self
    }

    pub fn kind(&self) -> NodeType {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Transition ids in declaration order.
    pub fn transitions(&self) -> &[TransitionId] {
        &self.transitions
    }

    pub fn response(&self) -> Option<&Ref> {
        self.response.as_ref()
    }

    pub fn processing(&self) -> Option<&Ref> {
        self.processing.as_ref()
    }

    pub fn misc(&self) -> Option<&Ref> {
        self.misc.as_ref()
    }
}

/// A `transitions` record: an edge from the owning node to `label`, taken
/// when `condition` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    label: Ref,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<Ref>,
}

impl Transition {
    /// Creates an unconditional transition to `label`.
    pub fn new(label: &str) -> Self {
        Self {
            label: Ref::parse(label),
            priority: None,
            condition: None,
        }
    }

    /// Sets the condition reference.
    pub fn with_condition(mut self, condition: &str) -> Self {
        self.condition = Some(Ref::parse(condition));
        self
    }

    /// Sets the transition priority.
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Transition target.
    pub fn label(&self) -> &Ref {
        &self.label
    }

    pub fn priority(&self) -> Option<f64> {
        self.priority
    }

    pub fn condition(&self) -> Option<&Ref> {
        self.condition.as_ref()
    }
}

/// A positional or keyword argument of a [`Link`].
///
/// The parser emits either a single reference or a group of references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Single(Ref),
    Group(Vec<Ref>),
}

/// A `linking` record: an application of `object` (a definition or another
/// link) to arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    object: Ref,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<Ref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<Argument>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    kwargs: IndexMap<String, Argument>,
}

impl Link {
    /// Creates a link to `object` without arguments.
    pub fn new(object: &str) -> Self {
        Self {
            object: Ref::parse(object),
            parent: None,
            args: Vec::new(),
            kwargs: IndexMap::new(),
        }
    }

    /// Sets the parent reference.
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(Ref::parse(parent));
        self
    }

    /// Appends a positional argument.
    pub fn with_arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    /// Adds a keyword argument.
    pub fn with_kwarg(mut self, key: impl Into<String>, arg: Argument) -> Self {
        self.kwargs.insert(key.into(), arg);
        self
    }

    pub fn object(&self) -> &Ref {
        &self.object
    }

    pub fn parent(&self) -> Option<&Ref> {
        self.parent.as_ref()
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    pub fn kwargs(&self) -> &IndexMap<String, Argument> {
        &self.kwargs
    }
}

/// A `py_defs` record: a named symbol from the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl Definition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
        }
    }

    /// Sets the source snippet.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// A `flows` record: a named group of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    name: String,
    #[serde(default)]
    nodes: Vec<NodeId>,
}

impl Flow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Appends a member node id.
    pub fn with_node(mut self, id: impl Into<NodeId>) -> Self {
        self.nodes.push(id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member node ids.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns true if `id` is a member of this flow.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|member| member == id)
    }
}

/// An `imports` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A `plots` record: a whole script, listing its flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    #[serde(default)]
    pub flows: Vec<FlowId>,
}

/// A `responses` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub response_object: Ref,
}

/// A `processings` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processing {
    #[serde(default)]
    pub items: Vec<IndexMap<String, Ref>>,
}

/// A `miscs` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Misc {
    #[serde(default)]
    pub items: IndexMap<String, Ref>,
}

/// The parsed plot: every record table the parser emits.
///
/// Record ids are assumed unique across all tables. Lookups never fail
/// loudly; a missing record is reported as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plot {
    imports: IndexMap<String, Import>,
    py_defs: IndexMap<DefinitionId, Definition>,
    plots: IndexMap<String, Script>,
    flows: IndexMap<FlowId, Flow>,
    nodes: IndexMap<NodeId, Node>,
    transitions: IndexMap<TransitionId, Transition>,
    responses: IndexMap<String, Response>,
    processings: IndexMap<String, Processing>,
    miscs: IndexMap<String, Misc>,
    linking: IndexMap<LinkId, Link>,
}

impl Plot {
    /// Returns the node record with the given id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterates over node records in document order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Returns the transition record with the given id.
    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.get(id)
    }

    /// Returns the link record with the given id.
    pub fn link(&self, id: &str) -> Option<&Link> {
        self.linking.get(id)
    }

    /// Returns the definition record with the given id.
    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.py_defs.get(id)
    }

    /// Returns the flow record with the given id.
    pub fn flow(&self, id: &str) -> Option<&Flow> {
        self.flows.get(id)
    }

    /// Iterates over flow records in document order.
    pub fn flows(&self) -> impl Iterator<Item = (&FlowId, &Flow)> {
        self.flows.iter()
    }

    /// Returns the first flow listing `node` as a member.
    pub fn flow_of(&self, node: &str) -> Option<&Flow> {
        self.flows.values().find(|flow| flow.contains(node))
    }

    pub fn imports(&self) -> &IndexMap<String, Import> {
        &self.imports
    }

    pub fn scripts(&self) -> &IndexMap<String, Script> {
        &self.plots
    }

    pub fn responses(&self) -> &IndexMap<String, Response> {
        &self.responses
    }

    pub fn processings(&self) -> &IndexMap<String, Processing> {
        &self.processings
    }

    pub fn miscs(&self) -> &IndexMap<String, Misc> {
        &self.miscs
    }

    /// Adds or replaces a node record.
    pub fn with_node(mut self, id: &str, node: Node) -> Self {
        self.nodes.insert(NodeId::new(id), node);
        self
    }

    /// Adds or replaces a transition record.
    pub fn with_transition(mut self, id: &str, transition: Transition) -> Self {
        self.transitions.insert(TransitionId::new(id), transition);
        self
    }

    /// Adds or replaces a link record.
    pub fn with_link(mut self, id: &str, link: Link) -> Self {
        self.linking.insert(LinkId::new(id), link);
        self
    }

    /// Adds or replaces a definition record.
    pub fn with_definition(mut self, id: &str, definition: Definition) -> Self {
        self.py_defs.insert(DefinitionId::new(id), definition);
        self
    }

    /// Adds or replaces a flow record.
    pub fn with_flow(mut self, id: &str, flow: Flow) -> Self {
        self.flows.insert(FlowId::new(id), flow);
        self
    }
}
