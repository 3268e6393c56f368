//! Live IDL property slots
//!
//! Elements expose script properties (`input.value`, `option.selected`)
//! that are distinct from their content attributes. Only the slots that
//! differ from attributes are stored here; reflected properties such as
//! `id` are routed to attributes by the document.

use std::collections::HashMap;
use std::fmt;

/// Value held in a property slot
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl PropertyValue {
    /// Script truthiness
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Property slots of a single element
#[derive(Debug, Clone, Default)]
pub struct PropertySlots {
    values: HashMap<String, PropertyValue>,
}

impl PropertySlots {
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: PropertyValue) -> Option<PropertyValue> {
        self.values.insert(name.to_string(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Properties exposed by every element but not assignable
const READ_ONLY: &[&str] = &[
    "attributes", "childNodes", "children", "classList", "dataset",
    "firstChild", "lastChild", "localName", "nextSibling", "nodeName",
    "nodeType", "ownerDocument", "parentNode", "previousSibling", "style",
    "tagName",
];

/// Read-only properties specific to form controls
const FORM_READ_ONLY: &[&str] = &["form", "labels", "list", "validity", "validationMessage"];

const GLOBAL: &[&str] = &[
    "accessKey", "className", "contentEditable", "dir", "draggable", "hidden",
    "id", "innerHTML", "lang", "slot", "spellcheck", "tabIndex", "textContent",
    "title",
];

const FORM_CONTROL: &[&str] = &[
    "accept", "autocomplete", "autofocus", "checked", "cols", "defaultChecked",
    "defaultValue", "disabled", "max", "maxLength", "min", "minLength",
    "multiple", "name", "pattern", "placeholder", "readOnly", "required",
    "rows", "selected", "selectedIndex", "size", "step", "type", "value",
];

const MEDIA: &[&str] = &[
    "autoplay", "controls", "currentTime", "loop", "muted", "playsInline",
    "poster", "preload", "src", "volume",
];

const EMBEDDED: &[&str] = &[
    "allowFullscreen", "alt", "async", "defer", "download", "height", "href",
    "rel", "src", "srcdoc", "target", "width",
];

/// Property names that mirror a content attribute
pub(crate) const REFLECTED: &[(&str, &str)] = &[
    ("className", "class"),
    ("dir", "dir"),
    ("href", "href"),
    ("id", "id"),
    ("lang", "lang"),
    ("name", "name"),
    ("placeholder", "placeholder"),
    ("src", "src"),
    ("title", "title"),
    ("type", "type"),
];

fn is_form_control(tag: &str) -> bool {
    matches!(tag, "input" | "select" | "textarea" | "button" | "option" | "output")
}

fn is_media(tag: &str) -> bool {
    matches!(tag, "video" | "audio")
}

fn is_embedded(tag: &str) -> bool {
    matches!(tag, "a" | "img" | "iframe" | "script" | "link" | "embed" | "area")
}

/// Whether elements with `tag` expose `name` as a property (`name in node`)
pub fn is_known_property(tag: &str, name: &str) -> bool {
    READ_ONLY.contains(&name)
        || GLOBAL.contains(&name)
        || (is_form_control(tag) && (FORM_CONTROL.contains(&name) || FORM_READ_ONLY.contains(&name)))
        || (is_media(tag) && MEDIA.contains(&name))
        || (is_embedded(tag) && EMBEDDED.contains(&name))
}

/// Whether assigning `name` on an element with `tag` must fail
pub fn is_read_only_property(tag: &str, name: &str) -> bool {
    READ_ONLY.contains(&name) || (is_form_control(tag) && FORM_READ_ONLY.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_properties_by_tag() {
        assert!(is_known_property("input", "value"));
        assert!(is_known_property("div", "className"));
        assert!(!is_known_property("div", "value"));
        assert!(is_known_property("video", "muted"));
        assert!(!is_known_property("div", "muted"));
    }

    #[test]
    fn test_read_only_properties() {
        assert!(is_read_only_property("div", "tagName"));
        assert!(is_read_only_property("input", "list"));
        assert!(!is_read_only_property("div", "list"));
        assert!(!is_read_only_property("input", "value"));
    }

    #[test]
    fn test_property_value_display() {
        assert_eq!(PropertyValue::Number(3.0).to_string(), "3");
        assert_eq!(PropertyValue::Number(0.5).to_string(), "0.5");
        assert_eq!(PropertyValue::Bool(true).to_string(), "true");
        assert_eq!(PropertyValue::Null.to_string(), "");
    }

    #[test]
    fn test_truthiness() {
        assert!(!PropertyValue::Str(String::new()).is_truthy());
        assert!(PropertyValue::Number(-1.0).is_truthy());
        assert!(!PropertyValue::Number(f64::NAN).is_truthy());
    }
}
