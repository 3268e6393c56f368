//! Property values
//!
//! Props arrive from the renderer already tagged, so every consumer matches
//! on the variant instead of sniffing runtime types.

use std::collections::BTreeMap;

use fos_dom::{EventListener, PropertyValue};
use indexmap::IndexMap;

/// Largest integer a double represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Insertion-ordered string-keyed map
///
/// Assigning an existing key overwrites the value in place, keeping the
/// key's first position.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: IndexMap<String, V>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<V>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<V>) -> Option<V> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Remove `key`, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Property bag handed to the driver for one node
pub type Props = OrderedMap<PropValue>;

/// Inline style map, keyed by camelCase CSS property
pub type StyleMap = OrderedMap<StyleValue>;

/// A single declared style value
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Number(f64),
    Str(String),
}

impl StyleValue {
    /// Value as CSS text, numbers without a unit
    pub fn to_css_text(&self) -> String {
        match self {
            Self::Number(n) => format_number(*n),
            Self::Str(s) => s.clone(),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Value of a single prop
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Explicit absence (`null` / `undefined`)
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    /// Plain nested object, e.g. the `{ __html }` payload
    Object(BTreeMap<String, PropValue>),
    /// Inline style map
    Style(StyleMap),
    /// Event callback
    Handler(EventListener),
}

impl PropValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Script truthiness
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::Object(_) | Self::Style(_) | Self::Handler(_) => true,
        }
    }

    /// Numeric coercion, NaN when the value has no numeric reading
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::Str(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse().unwrap_or(f64::NAN)
                }
            }
            Self::Object(_) | Self::Style(_) | Self::Handler(_) => f64::NAN,
        }
    }

    /// Attribute string form; `None` for values that cannot be written
    pub fn to_attribute_value(&self) -> Option<String> {
        match self {
            Self::Null | Self::Handler(_) => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Str(s) => Some(s.clone()),
            Self::Object(_) | Self::Style(_) => Some(self.to_json().to_string()),
        }
    }

    /// Value for a live property slot
    pub fn to_property_value(&self) -> PropertyValue {
        match self {
            Self::Null | Self::Handler(_) => PropertyValue::Null,
            Self::Bool(b) => PropertyValue::Bool(*b),
            Self::Number(n) => PropertyValue::Number(*n),
            Self::Str(s) => PropertyValue::Str(s.clone()),
            Self::Object(_) | Self::Style(_) => PropertyValue::Str(self.to_json().to_string()),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Null | Self::Handler(_) => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
                Value::from(*n as i64)
            }
            Self::Number(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Self::Str(s) => Value::String(s.clone()),
            Self::Object(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::Style(style) => Value::Object(
                style
                    .iter()
                    .map(|(k, v)| {
                        let v = match v {
                            StyleValue::Number(n) => PropValue::Number(*n),
                            StyleValue::Str(s) => PropValue::Str(s.clone()),
                        };
                        (k.to_string(), v.to_json())
                    })
                    .collect(),
            ),
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<StyleMap> for PropValue {
    fn from(style: StyleMap) -> Self {
        Self::Style(style)
    }
}

impl From<EventListener> for PropValue {
    fn from(listener: EventListener) -> Self {
        Self::Handler(listener)
    }
}

impl From<BTreeMap<String, PropValue>> for PropValue {
    fn from(map: BTreeMap<String, PropValue>) -> Self {
        Self::Object(map)
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Format a number the way script string conversion does
///
/// Integral values print without a fractional part and negative zero
/// prints as `0`. Magnitudes at or above `1e21` or below `1e-6` use
/// exponent form with an explicit sign (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        }
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_number_exponent_range() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_ordered_map_overwrite_keeps_position() {
        let mut map: OrderedMap<PropValue> = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 3);

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&PropValue::Number(3.0)));
    }

    #[test]
    fn test_ordered_map_remove_keeps_order() {
        let mut map: OrderedMap<PropValue> = (0..5).map(|i| (format!("k{i}"), PropValue::from(i))).collect();
        assert_eq!(map.remove("k1"), Some(PropValue::Number(1.0)));
        assert_eq!(map.remove("k1"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["k0", "k2", "k3", "k4"]);
    }

    #[test]
    fn test_ordered_map_many_keys() {
        let mut props = Props::with_capacity(20_000);
        for i in 0..20_000 {
            props.insert(format!("data-k{i}"), i);
        }
        assert_eq!(props.len(), 20_000);
        assert_eq!(props.keys().nth(19_999), Some("data-k19999"));
        assert_eq!(props.get("data-k123"), Some(&PropValue::Number(123.0)));
    }

    #[test]
    fn test_attribute_value() {
        assert_eq!(PropValue::from(true).to_attribute_value().as_deref(), Some("true"));
        assert_eq!(PropValue::from(12).to_attribute_value().as_deref(), Some("12"));
        assert_eq!(PropValue::Null.to_attribute_value(), None);
        assert_eq!(
            PropValue::Handler(EventListener::new(|_| {})).to_attribute_value(),
            None
        );

        let mut object = BTreeMap::new();
        object.insert("a".to_string(), PropValue::from(1));
        assert_eq!(PropValue::Object(object).to_attribute_value().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(PropValue::from(" 3 ").to_number(), 3.0);
        assert!(PropValue::from("abc").to_number().is_nan());
        assert_eq!(PropValue::from(true).to_number(), 1.0);
        assert_eq!(PropValue::Null.to_number(), 0.0);
    }

    #[test]
    fn test_option_into_prop_value() {
        assert_eq!(PropValue::from(None::<&str>), PropValue::Null);
        assert_eq!(PropValue::from(Some("x")), PropValue::from("x"));
    }
}
