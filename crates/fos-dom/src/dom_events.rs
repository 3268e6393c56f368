//! DOM Events
//!
//! Event listeners, dispatched events and mutation records.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::NodeId;

/// Event passed to listeners during dispatch
#[derive(Debug)]
pub struct Event {
    pub event_type: String,
    pub target: NodeId,
    pub current_target: NodeId,
    pub bubbles: bool,
    propagation_stopped: Cell<bool>,
}

impl Event {
    pub fn new(event_type: &str, target: NodeId, bubbles: bool) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            bubbles,
            propagation_stopped: Cell::new(false),
        }
    }

    /// Stop propagation to ancestors once the current node is done
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// Shared event callback
///
/// Two listeners are equal when they wrap the same allocation, which is how
/// `removeEventListener` finds the registration to drop.
#[derive(Clone)]
pub struct EventListener(Rc<dyn Fn(&Event)>);

impl EventListener {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventListener({:p})", Rc::as_ptr(&self.0))
    }
}

/// Record of a single document mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRecord {
    ChildList {
        target: NodeId,
        added: Option<NodeId>,
        removed: Option<NodeId>,
    },
    Attribute {
        target: NodeId,
        name: String,
        old_value: Option<String>,
        new_value: Option<String>,
    },
    Property {
        target: NodeId,
        name: String,
    },
    Style {
        target: NodeId,
        property: String,
        value: String,
    },
    CharacterData {
        target: NodeId,
        old_value: String,
    },
    Listener {
        target: NodeId,
        event_type: String,
        added: bool,
    },
}

impl MutationRecord {
    pub fn target(&self) -> NodeId {
        match self {
            Self::ChildList { target, .. }
            | Self::Attribute { target, .. }
            | Self::Property { target, .. }
            | Self::Style { target, .. }
            | Self::CharacterData { target, .. }
            | Self::Listener { target, .. } => *target,
        }
    }
}
