//! Document - High-level document API
//!
//! Script-facing operations on top of [`DomTree`]: node creation,
//! attributes, property slots, inline style, listeners, focus and
//! validation. Every mutation can be observed through [`MutationRecord`]s.

use crate::dom_events::{Event, EventListener, MutationRecord};
use crate::forms::{ValidationConstraints, ValidityState};
use crate::node::ElementData;
use crate::properties::{is_known_property, is_read_only_property, PropertyValue, REFLECTED};
use crate::serialize::{serialize_children, serialize_node};
use crate::{CssStyleDeclaration, DomError, DomResult, DomTree, Node, NodeData, NodeId};

/// Client width reported when the embedder does not provide one
pub const DEFAULT_CLIENT_WIDTH: f64 = 375.0;

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    active_element: Option<NodeId>,
    client_width: f64,
    observing: bool,
    mutations: Vec<MutationRecord>,
}

impl Document {
    /// Create a document with `<html>`, `<head>` and `<body>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.alloc(Node::element("html"));
        let head = tree.alloc(Node::element("head"));
        let body = tree.alloc(Node::element("body"));

        // Fresh nodes under a fresh root cannot violate the hierarchy
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
            active_element: None,
            client_width: DEFAULT_CLIENT_WIDTH,
            observing: false,
            mutations: Vec::new(),
        }
    }

    /// Set the width reported by `documentElement.clientWidth`
    pub fn with_client_width(mut self, width: f64) -> Self {
        self.client_width = width;
        self
    }

    pub fn client_width(&self) -> f64 {
        self.client_width
    }

    pub fn set_client_width(&mut self, width: f64) {
        self.client_width = width;
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get `<head>` element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Start or stop recording mutations
    pub fn observe(&mut self, enabled: bool) {
        self.observing = enabled;
        if !enabled {
            self.mutations.clear();
        }
    }

    /// Drain the recorded mutations
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.mutations)
    }

    fn record(&mut self, record: MutationRecord) {
        if self.observing {
            self.mutations.push(record);
        }
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.alloc(Node::element(tag))
    }

    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.tree.alloc(Node::text(text))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.tree.alloc(Node::comment(text))
    }

    /// First element in tree order whose `id` attribute equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).find(|&node| {
            self.tree
                .get(node)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.attrs.get("id") == Some(id))
        })
    }

    fn element(&self, node: NodeId) -> DomResult<&ElementData> {
        self.tree
            .node(node)?
            .as_element()
            .ok_or(DomError::InvalidNodeType { expected: "element" })
    }

    fn element_mut(&mut self, node: NodeId) -> DomResult<&mut ElementData> {
        self.tree
            .node_mut(node)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType { expected: "element" })
    }

    /// Lower-cased tag name of an element
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tree.get(node)?.as_element().map(|e| e.tag.as_str())
    }

    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.tree.next_sibling(node)
    }

    pub fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.children(node).collect()
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)?;
        self.clear_markup(parent);
        self.record(MutationRecord::ChildList {
            target: parent,
            added: Some(child),
            removed: None,
        });
        Ok(())
    }

    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.tree.insert_before(parent, child, reference)?;
        self.clear_markup(parent);
        self.record(MutationRecord::ChildList {
            target: parent,
            added: Some(child),
            removed: None,
        });
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.remove_child(parent, child)?;
        self.blur_detached(child);
        self.record(MutationRecord::ChildList {
            target: parent,
            added: None,
            removed: Some(child),
        });
        Ok(())
    }

    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<()> {
        self.tree.replace_child(parent, new_child, old_child)?;
        if new_child != old_child {
            self.blur_detached(old_child);
        }
        self.clear_markup(parent);
        self.record(MutationRecord::ChildList {
            target: parent,
            added: Some(new_child),
            removed: Some(old_child),
        });
        Ok(())
    }

    /// Drop focus held inside a subtree that just left the document
    fn blur_detached(&mut self, subtree: NodeId) {
        if self.active_element.is_some_and(|a| self.tree.is_inclusive_ancestor(subtree, a)) {
            self.active_element = None;
        }
    }

    fn clear_markup(&mut self, parent: NodeId) {
        if let Some(elem) = self.tree.get_mut(parent).and_then(|n| n.as_element_mut()) {
            elem.markup = None;
        }
    }

    /// `textContent` setter
    ///
    /// Replaces the data of text and comment nodes; on elements, replaces
    /// all children with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        match &mut self.tree.node_mut(node)?.data {
            NodeData::Text(data) | NodeData::Comment(data) => {
                let old_value = std::mem::replace(data, text.to_string());
                self.record(MutationRecord::CharacterData {
                    target: node,
                    old_value,
                });
                Ok(())
            }
            NodeData::Element(elem) => {
                elem.markup = None;
                self.tree.remove_all_children(node)?;
                if !text.is_empty() {
                    let child = self.create_text_node(text);
                    self.tree.append_child(node, child)?;
                }
                self.record(MutationRecord::ChildList {
                    target: node,
                    added: None,
                    removed: None,
                });
                Ok(())
            }
            NodeData::Document => Err(DomError::InvalidNodeType {
                expected: "element or character data",
            }),
        }
    }

    /// `textContent` getter
    pub fn text_content(&self, node: NodeId) -> String {
        match self.tree.get(node).map(|n| &n.data) {
            Some(NodeData::Text(text)) => text.clone(),
            Some(NodeData::Element(_)) | Some(NodeData::Document) => self
                .tree
                .descendants(node)
                .filter_map(|id| match &self.tree.get(id)?.data {
                    NodeData::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            _ => String::new(),
        }
    }

    /// `innerHTML` setter; the markup is kept verbatim, not parsed
    pub fn set_inner_html(&mut self, node: NodeId, html: Option<&str>) -> DomResult<()> {
        self.element(node)?;
        self.tree.remove_all_children(node)?;
        self.element_mut(node)?.markup = html.filter(|h| !h.is_empty()).map(str::to_string);
        self.record(MutationRecord::Property {
            target: node,
            name: "innerHTML".to_string(),
        });
        Ok(())
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        serialize_children(self, node, &mut out);
        out
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        serialize_node(self, node, &mut out);
        out
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let elem = self.tree.get(node)?.as_element()?;
        if name == "style" {
            return (!elem.style.is_empty()).then(|| elem.style.css_text());
        }
        elem.attrs.get(name).map(str::to_string)
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.tree
            .get(node)
            .and_then(|n| n.as_element())
            .is_some_and(|e| if name == "style" { !e.style.is_empty() } else { e.attrs.has(name) })
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        let elem = self.element_mut(node)?;
        let old_value = if name == "style" {
            let old = (!elem.style.is_empty()).then(|| elem.style.css_text());
            elem.style.set_css_text(value);
            old
        } else {
            elem.attrs.set(name, value)
        };
        self.record(MutationRecord::Attribute {
            target: node,
            name: name.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        });
        Ok(())
    }

    /// Remove an attribute; absent attributes are a no-op
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<()> {
        let elem = self.element_mut(node)?;
        let old_value = if name == "style" {
            let old = (!elem.style.is_empty()).then(|| elem.style.css_text());
            elem.style = CssStyleDeclaration::new();
            old
        } else {
            elem.attrs.remove(name)
        };
        if old_value.is_some() {
            self.record(MutationRecord::Attribute {
                target: node,
                name: name.to_string(),
                old_value,
                new_value: None,
            });
        }
        Ok(())
    }

    /// Script `name in node`
    pub fn has_property(&self, node: NodeId, name: &str) -> bool {
        match self.tree.get(node).map(|n| &n.data) {
            Some(NodeData::Element(elem)) => {
                is_known_property(&elem.tag, name) || elem.props.contains(name)
            }
            Some(NodeData::Text(_)) | Some(NodeData::Comment(_)) => {
                matches!(name, "data" | "nodeValue" | "textContent")
            }
            _ => false,
        }
    }

    pub fn get_property(&self, node: NodeId, name: &str) -> Option<PropertyValue> {
        let elem = self.tree.get(node)?.as_element()?;
        if let Some((_, attr)) = REFLECTED.iter().find(|(prop, _)| *prop == name) {
            return Some(PropertyValue::Str(elem.attrs.get(attr).unwrap_or_default().to_string()));
        }
        match name {
            "textContent" => return Some(PropertyValue::Str(self.text_content(node))),
            "innerHTML" => return Some(PropertyValue::Str(self.inner_html(node))),
            _ => {}
        }
        if let Some(value) = elem.props.get(name) {
            return Some(value.clone());
        }
        match name {
            "value" if elem.tag == "input" => {
                Some(PropertyValue::Str(elem.attrs.get("value").unwrap_or_default().to_string()))
            }
            "checked" | "selected" | "multiple" | "muted" if is_known_property(&elem.tag, name) => {
                Some(PropertyValue::Bool(elem.attrs.has(name)))
            }
            _ => None,
        }
    }

    /// Assign a property slot
    ///
    /// Fails with [`DomError::ReadOnlyProperty`] for getter-only properties.
    pub fn set_property(&mut self, node: NodeId, name: &str, value: PropertyValue) -> DomResult<()> {
        let target = self.tree.node(node)?;
        let tag = target.as_element().map(|e| e.tag.clone());
        let is_character_data = target.character_data().is_some();
        let Some(tag) = tag else {
            if is_character_data && matches!(name, "data" | "nodeValue" | "textContent") {
                return self.set_text_content(node, &value.to_string());
            }
            return Err(DomError::InvalidNodeType { expected: "element" });
        };
        if is_read_only_property(&tag, name) {
            return Err(DomError::ReadOnlyProperty(name.to_string()));
        }

        match name {
            "innerHTML" => {
                let html = value.to_string();
                return self.set_inner_html(node, Some(html.as_str()));
            }
            "textContent" => return self.set_text_content(node, &value.to_string()),
            _ => {}
        }

        if let Some((_, attr)) = REFLECTED.iter().find(|(prop, _)| *prop == name) {
            return match value {
                PropertyValue::Null => self.remove_attribute(node, attr),
                value => self.set_attribute(node, attr, &value.to_string()),
            };
        }

        self.element_mut(node)?.props.set(name, value);
        self.record(MutationRecord::Property {
            target: node,
            name: name.to_string(),
        });
        Ok(())
    }

    pub fn style(&self, node: NodeId) -> Option<&CssStyleDeclaration> {
        self.tree.get(node)?.as_element().map(|e| &e.style)
    }

    /// `node.style[name] = value`
    pub fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(node)?.style.set_property(name, value);
        self.record(MutationRecord::Style {
            target: node,
            property: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    /// Register a listener; registering the same listener twice is a no-op
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: EventListener,
    ) -> DomResult<()> {
        let elem = self.element_mut(node)?;
        let exists = elem
            .listeners
            .iter()
            .any(|(t, l)| t == event_type && *l == listener);
        if !exists {
            elem.listeners.push((event_type.to_string(), listener));
            self.record(MutationRecord::Listener {
                target: node,
                event_type: event_type.to_string(),
                added: true,
            });
        }
        Ok(())
    }

    pub fn remove_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: &EventListener,
    ) -> DomResult<()> {
        let elem = self.element_mut(node)?;
        let before = elem.listeners.len();
        elem.listeners.retain(|(t, l)| !(t == event_type && l == listener));
        if elem.listeners.len() != before {
            self.record(MutationRecord::Listener {
                target: node,
                event_type: event_type.to_string(),
                added: false,
            });
        }
        Ok(())
    }

    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.tree
            .get(node)
            .and_then(|n| n.as_element())
            .map_or(0, |e| e.listeners.iter().filter(|(t, _)| t == event_type).count())
    }

    /// Dispatch an event at `target`, bubbling through ancestors when asked
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch_event(&self, target: NodeId, event_type: &str, bubbles: bool) -> DomResult<usize> {
        self.tree.node(target)?;
        let mut event = Event::new(event_type, target, bubbles);
        let mut invoked = 0;
        let mut current = Some(target);

        while let Some(id) = current {
            let listeners: Vec<EventListener> = self
                .tree
                .get(id)
                .and_then(|n| n.as_element())
                .map(|e| {
                    e.listeners
                        .iter()
                        .filter(|(t, _)| t == event_type)
                        .map(|(_, l)| l.clone())
                        .collect()
                })
                .unwrap_or_default();

            event.current_target = id;
            for listener in &listeners {
                listener.call(&event);
                invoked += 1;
            }

            if !bubbles || event.is_propagation_stopped() {
                break;
            }
            current = self.tree.parent(id);
        }

        tracing::trace!("dispatched {} to {} listeners", event_type, invoked);
        Ok(invoked)
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    pub fn focus(&mut self, node: NodeId) -> DomResult<()> {
        self.element(node)?;
        self.active_element = Some(node);
        Ok(())
    }

    pub fn blur(&mut self) {
        self.active_element = None;
    }

    pub fn validity(&self, node: NodeId) -> Option<ValidityState> {
        self.tree.get(node)?.as_element().map(|e| e.validity)
    }

    /// Simulate the user typing `text` into a form control
    ///
    /// Updates the `value` slot, revalidates number inputs and fires a
    /// bubbling `input` event.
    pub fn type_into(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        let elem = self.element_mut(node)?;
        if elem.input_type().as_deref() == Some("number") {
            let constraints = ValidationConstraints::from_attributes(&elem.attrs);
            elem.validity = constraints.validate_number_input(text);
            let sanitized = if elem.validity.bad_input { "" } else { text };
            elem.props.set("value", PropertyValue::from(sanitized));
        } else {
            elem.props.set("value", PropertyValue::from(text));
        }
        self.dispatch_event(node, "input", true)?;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_document_structure() {
        let doc = Document::new();
        assert_eq!(doc.tag_name(doc.document_element()), Some("html"));
        assert_eq!(doc.parent_node(doc.body()), Some(doc.document_element()));
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        doc.set_attribute(inner, "id", "target").unwrap();
        doc.append_child(outer, inner).unwrap();

        assert_eq!(doc.get_element_by_id("target"), None);
        doc.append_child(doc.body(), outer).unwrap();
        assert_eq!(doc.get_element_by_id("target"), Some(inner));
    }

    #[test]
    fn test_style_attribute_backed_by_declaration() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_style_property(div, "backgroundColor", "red").unwrap();

        assert_eq!(doc.get_attribute(div, "style").as_deref(), Some("background-color: red;"));
        doc.remove_attribute(div, "style").unwrap();
        assert!(!doc.has_attribute(div, "style"));
    }

    #[test]
    fn test_reflected_property() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_property(div, "className", PropertyValue::from("box")).unwrap();

        assert_eq!(doc.get_attribute(div, "class").as_deref(), Some("box"));
        doc.set_property(div, "className", PropertyValue::Null).unwrap();
        assert!(!doc.has_attribute(div, "class"));
    }

    #[test]
    fn test_read_only_property() {
        let mut doc = Document::new();
        let input = doc.create_element("input");

        assert_eq!(
            doc.set_property(input, "list", PropertyValue::Null),
            Err(DomError::ReadOnlyProperty("list".to_string()))
        );
    }

    #[test]
    fn test_input_value_slot_separate_from_attribute() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attribute(input, "value", "a").unwrap();
        assert_eq!(doc.get_property(input, "value"), Some(PropertyValue::from("a")));

        doc.set_property(input, "value", PropertyValue::from("b")).unwrap();
        assert_eq!(doc.get_attribute(input, "value").as_deref(), Some("a"));
        assert_eq!(doc.get_property(input, "value"), Some(PropertyValue::from("b")));
    }

    #[test]
    fn test_type_into_number_input() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attribute(input, "type", "number").unwrap();

        doc.type_into(input, "12e").unwrap();
        assert!(doc.validity(input).unwrap().bad_input);

        doc.type_into(input, "12").unwrap();
        assert!(doc.validity(input).unwrap().is_valid());
    }

    #[test]
    fn test_dispatch_bubbles_and_stops() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("button");
        doc.append_child(outer, inner).unwrap();

        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        doc.add_event_listener(outer, "click", EventListener::new(move |_| h.set(h.get() + 1)))
            .unwrap();

        assert_eq!(doc.dispatch_event(inner, "click", true).unwrap(), 1);
        assert_eq!(doc.dispatch_event(inner, "click", false).unwrap(), 0);

        doc.add_event_listener(inner, "click", EventListener::new(|e| e.stop_propagation()))
            .unwrap();
        assert_eq!(doc.dispatch_event(inner, "click", true).unwrap(), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_inner_html_replaces_children() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let text = doc.create_text_node("old");
        doc.append_child(div, text).unwrap();

        doc.set_inner_html(div, Some("<b>new</b>")).unwrap();
        assert!(doc.child_nodes(div).is_empty());
        assert_eq!(doc.outer_html(div), "<div><b>new</b></div>");

        doc.set_inner_html(div, None).unwrap();
        assert_eq!(doc.inner_html(div), "");
    }

    #[test]
    fn test_mutation_records() {
        let mut doc = Document::new();
        doc.observe(true);
        let div = doc.create_element("div");
        doc.set_attribute(div, "title", "x").unwrap();
        doc.remove_attribute(div, "missing").unwrap();

        let records = doc.take_mutations();
        assert_eq!(records.len(), 1);
        assert!(matches!(&records[0], MutationRecord::Attribute { name, .. } if name == "title"));
    }
}
