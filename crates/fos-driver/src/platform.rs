//! Host platform interface
//!
//! The native document calls the driver makes. `fos_dom::Document`
//! implements it; other hosts only need to provide these primitives.

use fos_dom::{Document, DomResult, EventListener, NodeId, PropertyValue, ValidityState};

pub trait Platform {
    // Node creation and lookup
    fn create_element(&mut self, tag: &str) -> NodeId;
    fn create_text_node(&mut self, text: &str) -> NodeId;
    fn create_comment(&mut self, text: &str) -> NodeId;
    fn body(&self) -> NodeId;
    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// `document.documentElement.clientWidth`
    fn client_width(&self) -> f64;

    // Tree
    fn parent_node(&self, node: NodeId) -> Option<NodeId>;
    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()>;
    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> DomResult<()>;
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()>;
    fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) -> DomResult<()>;

    // Content
    fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()>;
    fn set_inner_html(&mut self, node: NodeId, html: Option<&str>) -> DomResult<()>;

    // Attributes and property slots
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()>;
    fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<()>;
    fn has_attribute(&self, node: NodeId, name: &str) -> bool;
    fn has_property(&self, node: NodeId, name: &str) -> bool;
    fn set_property(&mut self, node: NodeId, name: &str, value: PropertyValue) -> DomResult<()>;
    fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()>;

    // Events
    fn add_event_listener(&mut self, node: NodeId, event_type: &str, listener: EventListener) -> DomResult<()>;
    fn remove_event_listener(&mut self, node: NodeId, event_type: &str, listener: &EventListener) -> DomResult<()>;

    // Form state
    /// Effective `type` of an `<input>`, `None` for other nodes
    fn input_type(&self, node: NodeId) -> Option<String>;
    fn validity(&self, node: NodeId) -> Option<ValidityState>;
    fn active_element(&self) -> Option<NodeId>;
}

impl Platform for Document {
    fn create_element(&mut self, tag: &str) -> NodeId {
        Document::create_element(self, tag)
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        Document::create_text_node(self, text)
    }

    fn create_comment(&mut self, text: &str) -> NodeId {
        Document::create_comment(self, text)
    }

    fn body(&self) -> NodeId {
        Document::body(self)
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        Document::get_element_by_id(self, id)
    }

    fn client_width(&self) -> f64 {
        Document::client_width(self)
    }

    fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        Document::parent_node(self, node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        Document::next_sibling(self, node)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        Document::append_child(self, parent, child)
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> DomResult<()> {
        Document::insert_before(self, parent, child, reference)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        Document::remove_child(self, parent, child)
    }

    fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) -> DomResult<()> {
        Document::replace_child(self, parent, new_child, old_child)
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        Document::set_text_content(self, node, text)
    }

    fn set_inner_html(&mut self, node: NodeId, html: Option<&str>) -> DomResult<()> {
        Document::set_inner_html(self, node, html)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        Document::set_attribute(self, node, name, value)
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<()> {
        Document::remove_attribute(self, node, name)
    }

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        Document::has_attribute(self, node, name)
    }

    fn has_property(&self, node: NodeId, name: &str) -> bool {
        Document::has_property(self, node, name)
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: PropertyValue) -> DomResult<()> {
        Document::set_property(self, node, name, value)
    }

    fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        Document::set_style_property(self, node, name, value)
    }

    fn add_event_listener(&mut self, node: NodeId, event_type: &str, listener: EventListener) -> DomResult<()> {
        Document::add_event_listener(self, node, event_type, listener)
    }

    fn remove_event_listener(&mut self, node: NodeId, event_type: &str, listener: &EventListener) -> DomResult<()> {
        Document::remove_event_listener(self, node, event_type, listener)
    }

    fn input_type(&self, node: NodeId) -> Option<String> {
        self.tree().get(node)?.as_element()?.input_type()
    }

    fn validity(&self, node: NodeId) -> Option<ValidityState> {
        Document::validity(self, node)
    }

    fn active_element(&self) -> Option<NodeId> {
        Document::active_element(self)
    }
}
