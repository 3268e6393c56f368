//! Platform Driver
//!
//! Executes the renderer's node and prop effects against a [`Platform`].
//! The renderer decides *what* changes; the driver decides *how* each prop
//! lands on the element: attribute or property slot, inline style, or
//! listener.

use fos_dom::{Document, DomError, DomResult, EventListener, NodeId, PropertyValue};

use crate::config::DriverConfig;
use crate::events::{EventAction, EventRegistry};
use crate::platform::Platform;
use crate::properties::{self, PropertyDetail};
use crate::style::transform_styles;
use crate::units::UnitConverter;
use crate::value::{PropValue, Props, StyleMap};
use crate::viewport::Viewport;

const DANGEROUSLY_SET_INNER_HTML: &str = "dangerouslySetInnerHTML";
const INNER_HTML_FIELD: &str = "__html";
const CLASS_NAME: &str = "className";
const CLASS: &str = "class";
const STYLE: &str = "style";
const CHILDREN: &str = "children";
const VALUE: &str = "value";
const EMPTY_COMMENT: &str = " empty ";

/// Event name for an `onXxx` prop key
fn event_name(prop: &str) -> Option<String> {
    let rest = prop.strip_prefix("on")?;
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
        .then(|| rest.to_lowercase())
}

/// Renderer-facing adapter over a host document
pub struct Driver<P: Platform = Document> {
    platform: P,
    viewport: Viewport,
    units: UnitConverter,
    event_registry: EventRegistry<P>,
}

impl Driver<Document> {
    /// Driver over a fresh [`Document`] with the default configuration
    pub fn new() -> Self {
        Self::with_platform(Document::new(), DriverConfig::default())
    }
}

impl Default for Driver<Document> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> Driver<P> {
    pub fn with_platform(platform: P, config: DriverConfig) -> Self {
        Self {
            platform,
            viewport: Viewport::new(config.device_width, config.viewport_width),
            units: UnitConverter::new(),
            event_registry: EventRegistry::new(),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn into_platform(self) -> P {
        self.platform
    }

    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    pub fn event_registry(&self) -> &EventRegistry<P> {
        &self.event_registry
    }

    pub fn event_registry_mut(&mut self) -> &mut EventRegistry<P> {
        &mut self.event_registry
    }

    pub fn get_device_width(&self) -> f64 {
        self.viewport.device_width(self.platform.client_width())
    }

    /// Pin the device width instead of reading the live document width
    pub fn set_device_width(&mut self, width: f64) {
        self.viewport.set_device_width(Some(width));
    }

    pub fn get_viewport_width(&self) -> f64 {
        self.viewport.viewport_width()
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport.set_viewport_width(width);
    }

    /// Refresh the unit scale; call once before each render pass
    pub fn before_render(&mut self) {
        match self.viewport.scale_ratio(self.platform.client_width()) {
            Some(ratio) => {
                tracing::debug!("rem scale set to {}", ratio);
                self.units.set_rem(ratio);
            }
            None => tracing::warn!(
                "ignoring degenerate viewport: device width {}, viewport width {}",
                self.get_device_width(),
                self.get_viewport_width()
            ),
        }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.platform.get_element_by_id(id)
    }

    pub fn create_body(&self) -> NodeId {
        self.platform.body()
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.platform.create_comment(content)
    }

    /// Placeholder for a component that rendered nothing
    pub fn create_empty(&mut self) -> NodeId {
        self.create_comment(EMPTY_COMMENT)
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.platform.create_text_node(text)
    }

    pub fn update_text(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        self.platform.set_text_content(node, text)
    }

    /// Create an element and apply `props` to it
    pub fn create_element(&mut self, tag: &str, props: &Props) -> DomResult<NodeId> {
        let node = self.platform.create_element(tag);
        tracing::trace!("created <{}> as {:?}", tag, node);
        self.set_native_props(node, props)?;
        Ok(node)
    }

    pub fn append_child(&mut self, node: NodeId, parent: NodeId) -> DomResult<()> {
        self.platform.append_child(parent, node)
    }

    /// Detach `node`; a node that has no parent is left alone
    pub fn remove_child(&mut self, node: NodeId, parent: Option<NodeId>) -> DomResult<()> {
        match self.platform.parent_node(node) {
            Some(current) => self.platform.remove_child(parent.unwrap_or(current), node),
            None => {
                tracing::trace!("{:?} already detached", node);
                Ok(())
            }
        }
    }

    pub fn replace_child(
        &mut self,
        new_child: NodeId,
        old_child: NodeId,
        parent: Option<NodeId>,
    ) -> DomResult<()> {
        let parent = self.resolve_parent(parent, old_child)?;
        self.platform.replace_child(parent, new_child, old_child)
    }

    /// Insert `node` right after `after`, appending when `after` is last
    pub fn insert_after(
        &mut self,
        node: NodeId,
        after: NodeId,
        parent: Option<NodeId>,
    ) -> DomResult<()> {
        let parent = self.resolve_parent(parent, after)?;
        match self.platform.next_sibling(after) {
            Some(next) => self.platform.insert_before(parent, node, Some(next)),
            None => self.platform.append_child(parent, node),
        }
    }

    pub fn insert_before(
        &mut self,
        node: NodeId,
        before: NodeId,
        parent: Option<NodeId>,
    ) -> DomResult<()> {
        let parent = self.resolve_parent(parent, before)?;
        self.platform.insert_before(parent, node, Some(before))
    }

    fn resolve_parent(&self, parent: Option<NodeId>, reference: NodeId) -> DomResult<NodeId> {
        parent
            .or_else(|| self.platform.parent_node(reference))
            .ok_or(DomError::NotAChild)
    }

    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_name: &str,
        handler: &EventListener,
        props: Option<&Props>,
    ) -> DomResult<()> {
        match self.event_registry.get(event_name) {
            Some(custom) => custom(EventAction::AddEvent, &mut self.platform, node, event_name, handler, props),
            None => self.platform.add_event_listener(node, event_name, handler.clone()),
        }
    }

    pub fn remove_event_listener(
        &mut self,
        node: NodeId,
        event_name: &str,
        handler: &EventListener,
        props: Option<&Props>,
    ) -> DomResult<()> {
        match self.event_registry.get(event_name) {
            Some(custom) => custom(EventAction::RemoveEvent, &mut self.platform, node, event_name, handler, props),
            None => self.platform.remove_event_listener(node, event_name, handler),
        }
    }

    /// No-op: listeners are dropped together with their node
    pub fn remove_all_event_listeners(&mut self, _node: NodeId) {}

    /// Route (un)subscription of `event_name` through `f` instead of the
    /// native listener API
    pub fn register_event<F>(&mut self, event_name: &str, f: F)
    where
        F: Fn(EventAction, &mut P, NodeId, &str, &EventListener, Option<&Props>) -> DomResult<()> + 'static,
    {
        self.event_registry.register(event_name, f);
    }

    pub fn unregister_event(&mut self, event_name: &str) -> bool {
        self.event_registry.unregister(event_name)
    }

    /// Remove a previously applied prop from `node`
    pub fn remove_attribute(&mut self, node: NodeId, key: &str) -> DomResult<()> {
        if key == DANGEROUSLY_SET_INNER_HTML {
            return self.platform.set_inner_html(node, None);
        }

        let key = if key == CLASS_NAME { CLASS } else { key };
        self.clear_property_slot(node, key);
        self.platform.remove_attribute(node, key)
    }

    /// Null the live slot behind `key`, if any. Getter-only slots refuse
    /// the write and are left as they are.
    fn clear_property_slot(&mut self, node: NodeId, key: &str) {
        if !self.platform.has_property(node, key) {
            return;
        }
        if let Err(err) = self.platform.set_property(node, key, PropertyValue::Null) {
            tracing::trace!("could not clear property {}: {}", key, err);
        }
    }

    /// Apply one prop to `node`
    pub fn set_attribute(&mut self, node: NodeId, key: &str, value: &PropValue) -> DomResult<()> {
        if key == DANGEROUSLY_SET_INNER_HTML {
            return self.platform.set_inner_html(node, inner_html(value).as_deref());
        }

        let should_set = properties::should_set_attribute(key, value);
        match properties::get_property_detail(key) {
            Some(detail) if should_set => {
                if properties::should_set_null_value(key, value) {
                    self.remove_property(node, key)?;
                } else if detail.must_use_property {
                    self.set_property(node, &detail.property_name, value)?;
                } else {
                    self.set_dom_attribute(node, detail, value)?;
                }

                if key == VALUE {
                    self.mutate_value(node, value)?;
                }
                Ok(())
            }
            _ => {
                if !should_set {
                    tracing::trace!("dropping unsupported value for {}", key);
                }
                match value.to_attribute_value().filter(|_| should_set) {
                    Some(text) => self.platform.set_attribute(node, key, &text),
                    None => self.platform.remove_attribute(node, key),
                }
            }
        }
    }

    /// Sync the `value` attribute after a `value` prop update
    ///
    /// Number inputs that already carry the attribute are left alone while
    /// focused or holding unparsable input. The next call after blur
    /// catches up.
    pub fn mutate_value(&mut self, node: NodeId, value: &PropValue) -> DomResult<()> {
        let Some(text) = value.to_attribute_value() else {
            return self.platform.remove_attribute(node, VALUE);
        };

        let is_number = self.platform.input_type(node).as_deref() == Some("number");
        if !is_number || !self.platform.has_attribute(node, VALUE) {
            return self.platform.set_attribute(node, VALUE, &text);
        }

        let bad_input = self.platform.validity(node).is_some_and(|v| v.bad_input);
        let focused = self.platform.active_element() == Some(node);
        if !bad_input && !focused {
            self.platform.set_attribute(node, VALUE, &text)
        } else {
            tracing::trace!("deferring value sync on {:?} (focused: {}, bad input: {})", node, focused, bad_input);
            Ok(())
        }
    }

    /// Serialize `value` into the attribute described by `detail`
    pub fn set_dom_attribute(
        &mut self,
        node: NodeId,
        detail: &PropertyDetail,
        value: &PropValue,
    ) -> DomResult<()> {
        let Some(text) = value.to_attribute_value() else {
            return self.platform.remove_attribute(node, &detail.attribute_name);
        };

        let bare = detail.has_boolean_value
            || (detail.has_overloaded_boolean_value && *value == PropValue::Bool(true));
        let text = if bare { "" } else { text.as_str() };
        self.platform.set_attribute(node, &detail.attribute_name, text)
    }

    /// Reset a classified prop to its cleared state
    pub fn remove_property(&mut self, node: NodeId, key: &str) -> DomResult<()> {
        match properties::get_property_detail(key) {
            Some(detail) if detail.must_use_property => {
                let cleared = if detail.has_boolean_value {
                    PropertyValue::Bool(false)
                } else {
                    PropertyValue::Str(String::new())
                };
                self.platform.set_property(node, key, cleared)
            }
            Some(detail) => self.platform.remove_attribute(node, &detail.attribute_name),
            None => self.platform.remove_attribute(node, key),
        }
    }

    pub fn set_property(&mut self, node: NodeId, key: &str, value: &PropValue) -> DomResult<()> {
        self.platform.set_property(node, key, value.to_property_value())
    }

    /// See [`properties::should_set_attribute`]
    pub fn should_set_attribute(&self, key: &str, value: &PropValue) -> bool {
        properties::should_set_attribute(key, value)
    }

    /// Apply an inline style map, expanding flex props and converting units
    pub fn set_styles(&mut self, node: NodeId, styles: &StyleMap) -> DomResult<()> {
        let transformed = transform_styles(styles, &self.units);
        for (prop, value) in transformed.iter() {
            for v in value.values() {
                self.platform.set_style_property(node, prop, v)?;
            }
        }
        Ok(())
    }

    /// Apply a whole prop bag
    ///
    /// `children` is skipped, `Null` values are ignored (not removed),
    /// `style` goes to [`Driver::set_styles`], `onXxx` handlers become
    /// listeners for `xxx`, everything else goes to [`Driver::set_attribute`].
    pub fn set_native_props(&mut self, node: NodeId, props: &Props) -> DomResult<()> {
        for (key, value) in props.iter() {
            if key == CHILDREN || value.is_null() {
                continue;
            }

            if key == STYLE {
                match value {
                    PropValue::Style(styles) => self.set_styles(node, styles)?,
                    PropValue::Str(css) => self.platform.set_attribute(node, STYLE, css)?,
                    _ => tracing::trace!("ignoring non-map style on {:?}", node),
                }
            } else if let Some(name) = event_name(key) {
                match value {
                    PropValue::Handler(handler) => self.add_event_listener(node, &name, handler, Some(props))?,
                    _ => tracing::trace!("ignoring non-callable {} on {:?}", key, node),
                }
            } else {
                self.set_attribute(node, key, value)?;
            }
        }
        Ok(())
    }
}

/// Markup carried by a `dangerouslySetInnerHTML` payload
fn inner_html(value: &PropValue) -> Option<String> {
    match value {
        PropValue::Object(map) => map
            .get(INNER_HTML_FIELD)
            .filter(|html| html.is_truthy())
            .and_then(PropValue::to_attribute_value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name() {
        assert_eq!(event_name("onClick").as_deref(), Some("click"));
        assert_eq!(event_name("onTouchStart").as_deref(), Some("touchstart"));
        assert_eq!(event_name("one"), None);
        assert_eq!(event_name("on"), None);
        assert_eq!(event_name("iconColor"), None);
    }

    #[test]
    fn test_inner_html_payload() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(INNER_HTML_FIELD.to_string(), PropValue::from("<i>x</i>"));
        assert_eq!(inner_html(&PropValue::Object(map)).as_deref(), Some("<i>x</i>"));

        let mut empty = std::collections::BTreeMap::new();
        empty.insert(INNER_HTML_FIELD.to_string(), PropValue::from(""));
        assert_eq!(inner_html(&PropValue::Object(empty)), None);
        assert_eq!(inner_html(&PropValue::from("<i>x</i>")), None);
    }

    #[test]
    fn test_create_empty_is_comment() {
        let mut driver = Driver::new();
        let node = driver.create_empty();
        assert_eq!(driver.platform().outer_html(node), "<!-- empty -->");
    }
}
