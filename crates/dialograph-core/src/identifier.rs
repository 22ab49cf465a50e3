//! Typed identifiers for plot records and display graph vertices.
//!
//! The parser hands out opaque string ids whose prefix encodes the record kind
//! (`id#nd_…` for nodes, `id#tr_…` for transitions and so on). This module
//! classifies those strings once, at deserialization time, into the newtypes
//! below and the [`Ref`] enum, so that downstream code matches on variants
//! instead of sniffing prefixes.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

macro_rules! plot_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Id prefix the parser uses for this record kind.
            pub const PREFIX: &'static str = $prefix;

            /// Wraps a raw id string without validating its prefix.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

plot_id!(
    /// Id of a `nodes` record.
    NodeId,
    "id#nd"
);
plot_id!(
    /// Id of a `transitions` record.
    TransitionId,
    "id#tr"
);
plot_id!(
    /// Id of a `linking` record.
    LinkId,
    "id#ln"
);
plot_id!(
    /// Id of a `py_defs` record.
    DefinitionId,
    "id#df"
);
plot_id!(
    /// Id of a `flows` record.
    FlowId,
    "id#fl"
);

/// A cross reference found inside a plot record.
///
/// Fields such as a transition's `label` or a link's `object` may point at
/// records of several kinds, or hold a plain literal. The variant is decided
/// by the id prefix when the plot is deserialized.
///
/// # Examples
///
/// ```
/// use dialograph_core::identifier::{NodeId, Ref};
///
/// assert_eq!(Ref::parse("id#nd_322a8f8f"), Ref::Node(NodeId::new("id#nd_322a8f8f")));
/// assert!(matches!(Ref::parse("repeat"), Ref::Other(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ref {
    Node(NodeId),
    Transition(TransitionId),
    Link(LinkId),
    Definition(DefinitionId),
    Flow(FlowId),
    /// Literal text or an id of a record kind the graph does not use.
    Other(String),
}

impl Ref {
    /// Classifies a raw string by its id prefix.
    pub fn parse(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }

    /// Returns the raw string this reference was parsed from.
    pub fn as_str(&self) -> &str {
        match self {
            Ref::Node(id) => id.as_str(),
            Ref::Transition(id) => id.as_str(),
            Ref::Link(id) => id.as_str(),
            Ref::Definition(id) => id.as_str(),
            Ref::Flow(id) => id.as_str(),
            Ref::Other(raw) => raw,
        }
    }

    /// Returns the node id if this reference points at a node.
    pub fn as_node(&self) -> Option<&NodeId> {
        match self {
            Ref::Node(id) => Some(id),
            _ => None,
        }
    }
}

impl From<String> for Ref {
    fn from(raw: String) -> Self {
        if raw.starts_with(NodeId::PREFIX) {
            Ref::Node(NodeId(raw))
        } else if raw.starts_with(TransitionId::PREFIX) {
            Ref::Transition(TransitionId(raw))
        } else if raw.starts_with(LinkId::PREFIX) {
            Ref::Link(LinkId(raw))
        } else if raw.starts_with(DefinitionId::PREFIX) {
            Ref::Definition(DefinitionId(raw))
        } else if raw.starts_with(FlowId::PREFIX) {
            Ref::Flow(FlowId(raw))
        } else {
            Ref::Other(raw)
        }
    }
}

impl From<Ref> for String {
    fn from(reference: Ref) -> Self {
        match reference {
            Ref::Node(NodeId(raw))
            | Ref::Transition(TransitionId(raw))
            | Ref::Link(LinkId(raw))
            | Ref::Definition(DefinitionId(raw))
            | Ref::Flow(FlowId(raw))
            | Ref::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a vertex in the display graph.
///
/// Display vertices are derived either from plot nodes or from transitions,
/// and keep the originating record's id so that the same logical vertex has
/// the same [`Id`] across re-derivations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Creates an `Id` from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&NodeId> for Id {
    fn from(id: &NodeId) -> Self {
        Self::new(id.as_str())
    }
}

impl From<&TransitionId> for Id {
    fn from(id: &TransitionId) -> Self {
        Self::new(id.as_str())
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
