//! Flexbox expansion
//!
//! Each flex property expands into the standard declaration plus the
//! `-webkit-` flex and legacy `-webkit-box` equivalents.

use crate::units::CssValue;
use crate::value::{OrderedMap, StyleValue};

const FLEX_PROPS: &[&str] = &[
    "alignItems",
    "alignSelf",
    "display",
    "flex",
    "flexDirection",
    "flexWrap",
    "justifyContent",
];

pub fn is_flex_prop(name: &str) -> bool {
    FLEX_PROPS.contains(&name)
}

fn box_align(value: &str) -> Option<&'static str> {
    match value {
        "stretch" => Some("stretch"),
        "flex-start" => Some("start"),
        "flex-end" => Some("end"),
        "center" => Some("center"),
        _ => None,
    }
}

fn box_orient(value: &str) -> Option<&'static str> {
    match value {
        "row" => Some("horizontal"),
        "column" => Some("vertical"),
        _ => None,
    }
}

fn box_pack(value: &str) -> Option<&'static str> {
    match value {
        "flex-start" => Some("start"),
        "flex-end" => Some("end"),
        "center" => Some("center"),
        "space-between" | "space-around" => Some("justify"),
        _ => None,
    }
}

/// Expand a flex property into `out`
///
/// Returns `false`, leaving `out` untouched, when `name` is not a flex
/// property.
pub fn expand(name: &str, value: &StyleValue, out: &mut OrderedMap<CssValue>) -> bool {
    let value = value.to_css_text();
    let legacy = |map: fn(&str) -> Option<&'static str>| map(&value).map(CssValue::from);

    match name {
        "display" => {
            let expanded = match value.as_str() {
                "flex" => fallbacks(&["-webkit-box", "-webkit-flex", "flex"]),
                "inline-flex" => fallbacks(&["-webkit-inline-box", "-webkit-inline-flex", "inline-flex"]),
                other => CssValue::from(other),
            };
            out.insert("display", expanded);
        }
        "flex" => {
            out.insert("webkitBoxFlex", value.as_str());
            out.insert("webkitFlex", value.as_str());
            out.insert("flex", value.as_str());
        }
        "flexWrap" => {
            out.insert("flexWrap", value.as_str());
        }
        "alignItems" => {
            if let Some(v) = legacy(box_align) {
                out.insert("webkitBoxAlign", v);
            }
            out.insert("webkitAlignItems", value.as_str());
            out.insert("alignItems", value.as_str());
        }
        "alignSelf" => {
            out.insert("webkitAlignSelf", value.as_str());
            out.insert("alignSelf", value.as_str());
        }
        "flexDirection" => {
            if let Some(v) = legacy(box_orient) {
                out.insert("webkitBoxOrient", v);
            }
            out.insert("webkitFlexDirection", value.as_str());
            out.insert("flexDirection", value.as_str());
        }
        "justifyContent" => {
            if let Some(v) = legacy(box_pack) {
                out.insert("webkitBoxPack", v);
            }
            out.insert("webkitJustifyContent", value.as_str());
            out.insert("justifyContent", value.as_str());
        }
        _ => return false,
    }
    true
}

fn fallbacks(values: &[&str]) -> CssValue {
    CssValue::Fallbacks(values.iter().map(|v| v.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_one(name: &str, value: impl Into<StyleValue>) -> OrderedMap<CssValue> {
        let mut out = OrderedMap::new();
        assert!(expand(name, &value.into(), &mut out));
        out
    }

    #[test]
    fn test_display_flex_fallbacks() {
        let out = expand_one("display", "flex");
        assert_eq!(
            out.get("display"),
            Some(&fallbacks(&["-webkit-box", "-webkit-flex", "flex"]))
        );
    }

    #[test]
    fn test_display_block_verbatim() {
        let out = expand_one("display", "block");
        assert_eq!(out.get("display"), Some(&CssValue::from("block")));
    }

    #[test]
    fn test_flex_direction() {
        let out = expand_one("flexDirection", "column");
        assert_eq!(
            out.keys().collect::<Vec<_>>(),
            vec!["webkitBoxOrient", "webkitFlexDirection", "flexDirection"]
        );
        assert_eq!(out.get("webkitBoxOrient"), Some(&CssValue::from("vertical")));
    }

    #[test]
    fn test_unmapped_legacy_value_omitted() {
        let out = expand_one("justifyContent", "space-evenly");
        assert!(!out.contains_key("webkitBoxPack"));
        assert_eq!(out.get("justifyContent"), Some(&CssValue::from("space-evenly")));
    }

    #[test]
    fn test_numeric_flex() {
        let out = expand_one("flex", 1);
        assert_eq!(out.len(), 3);
        assert_eq!(out.get("webkitBoxFlex"), Some(&CssValue::from("1")));
    }

    #[test]
    fn test_not_flex_prop() {
        let mut out = OrderedMap::new();
        assert!(!expand("width", &StyleValue::Number(1.0), &mut out));
        assert!(out.is_empty());
        assert!(!is_flex_prop("width"));
    }
}
