//! fOS DOM - Document Object Model
//!
//! Arena-backed, single-threaded document. Serves as the host platform the
//! driver mutates: node tree, attributes, live property slots, inline style,
//! event listeners, focus and form validity.

mod attributes;
mod document;
mod dom_events;
mod forms;
mod node;
mod operations;
mod properties;
mod serialize;
mod style;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::Document;
pub use dom_events::{Event, EventListener, MutationRecord};
pub use forms::{ValidationConstraints, ValidityState};
pub use node::{ElementData, Node, NodeData};
pub use operations::{DomError, DomResult};
pub use properties::{is_known_property, is_read_only_property, PropertySlots, PropertyValue};
pub use style::{to_css_property_name, CssStyleDeclaration};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert to `Option`, mapping the sentinel to `None`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}
