//! Event registry
//!
//! Per-event-name overrides for listener wiring. Events without an override
//! go straight to the platform's native listener API.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use fos_dom::{DomResult, EventListener, NodeId};

use crate::Props;

/// What an override is asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    AddEvent,
    RemoveEvent,
}

/// Custom (un)subscribe function for one event name
pub type EventOverride<P> =
    Rc<dyn Fn(EventAction, &mut P, NodeId, &str, &EventListener, Option<&Props>) -> DomResult<()>>;

/// Event name to override map
pub struct EventRegistry<P> {
    overrides: HashMap<String, EventOverride<P>>,
}

impl<P> EventRegistry<P> {
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Install an override, replacing any previous one for `event_name`
    pub fn register<F>(&mut self, event_name: &str, f: F)
    where
        F: Fn(EventAction, &mut P, NodeId, &str, &EventListener, Option<&Props>) -> DomResult<()> + 'static,
    {
        tracing::debug!("registering event override for '{}'", event_name);
        self.overrides.insert(event_name.to_string(), Rc::new(f));
    }

    /// Remove the override for `event_name`; returns whether one existed
    pub fn unregister(&mut self, event_name: &str) -> bool {
        self.overrides.remove(event_name).is_some()
    }

    pub fn get(&self, event_name: &str) -> Option<EventOverride<P>> {
        self.overrides.get(event_name).cloned()
    }

    pub fn contains(&self, event_name: &str) -> bool {
        self.overrides.contains_key(event_name)
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<P> Default for EventRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for EventRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.overrides.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("EventRegistry").field("overrides", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_unregister() {
        let mut registry: EventRegistry<()> = EventRegistry::new();
        registry.register("tap", |_, _, _, _, _, _| Ok(()));

        assert!(registry.contains("tap"));
        assert!(registry.get("tap").is_some());
        assert!(registry.unregister("tap"));
        assert!(!registry.unregister("tap"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_override_receives_action() {
        let mut registry: EventRegistry<Vec<EventAction>> = EventRegistry::new();
        registry.register("swipe", |action, log, _, _, _, _| {
            log.push(action);
            Ok(())
        });

        let mut log = Vec::new();
        let f = registry.get("swipe").unwrap();
        let listener = EventListener::new(|_| {});
        f(EventAction::RemoveEvent, &mut log, NodeId::ROOT, "swipe", &listener, None).unwrap();

        assert_eq!(log, vec![EventAction::RemoveEvent]);
    }

    #[test]
    fn test_debug_lists_names() {
        let mut registry: EventRegistry<()> = EventRegistry::new();
        registry.register("b", |_, _, _, _, _, _| Ok(()));
        registry.register("a", |_, _, _, _, _, _| Ok(()));

        assert_eq!(format!("{registry:?}"), r#"EventRegistry { overrides: ["a", "b"] }"#);
    }
}
