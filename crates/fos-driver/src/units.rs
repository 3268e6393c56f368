//! Responsive style units
//!
//! Bare numbers and `rem` lengths are design units: one unit equals `rem`
//! device pixels, where `rem` is `device width / viewport width` as set by
//! the driver before each render pass.

use crate::value::{format_number, StyleValue};

/// Properties whose numeric values carry no unit
const UNITLESS_PROPERTIES: &[&str] = &[
    "animationIterationCount",
    "borderImageOutset",
    "borderImageSlice",
    "borderImageWidth",
    "boxFlex",
    "boxFlexGroup",
    "boxOrdinalGroup",
    "columnCount",
    "fillOpacity",
    "flex",
    "flexGrow",
    "flexNegative",
    "flexOrder",
    "flexPositive",
    "flexShrink",
    "floodOpacity",
    "fontWeight",
    "gridColumn",
    "gridRow",
    "lineClamp",
    "lineHeight",
    "opacity",
    "order",
    "orphans",
    "stopOpacity",
    "strokeDashoffset",
    "strokeMiterlimit",
    "strokeOpacity",
    "strokeWidth",
    "tabSize",
    "widows",
    "zIndex",
    "zoom",
];

/// Converted style value
///
/// `Fallbacks` holds alternatives for engines that disagree on a value; they
/// are assigned in order so the last one the engine understands sticks.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    Single(String),
    Fallbacks(Vec<String>),
}

impl CssValue {
    /// Values in assignment order
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Fallbacks(vs) => vs,
        }
    }
}

impl From<&str> for CssValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for CssValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

pub fn is_unitless(property: &str) -> bool {
    UNITLESS_PROPERTIES.contains(&property)
}

/// Design-unit to pixel converter
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConverter {
    rem: f64,
}

impl UnitConverter {
    pub fn new() -> Self {
        Self { rem: 1.0 }
    }

    /// Pixels per design unit
    pub fn rem(&self) -> f64 {
        self.rem
    }

    pub fn set_rem(&mut self, rem: f64) {
        self.rem = rem;
    }

    /// Convert a declared value for `property`
    pub fn convert_unit(&self, value: &StyleValue, property: &str) -> CssValue {
        match value {
            StyleValue::Number(n) if is_unitless(property) => CssValue::Single(format_number(*n)),
            StyleValue::Number(n) => CssValue::Single(format!("{}px", format_number(n * self.rem))),
            StyleValue::Str(s) => CssValue::Single(self.convert_rem_tokens(s)),
        }
    }

    /// Rewrite every `<number>rem` token in `value` to pixels
    fn convert_rem_tokens(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(pos) = rest.find("rem") {
            let (head, tail) = rest.split_at(pos);
            let after = &tail[3..];
            let at_boundary = !after.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
            let number = numeric_suffix_start(head)
                .filter(|_| at_boundary)
                .and_then(|start| head[start..].parse::<f64>().ok().map(|n| (start, n)));

            match number {
                Some((start, n)) => {
                    out.push_str(&head[..start]);
                    out.push_str(&format_number(n * self.rem));
                    out.push_str("px");
                }
                None => {
                    out.push_str(head);
                    out.push_str("rem");
                }
            }
            rest = after;
        }
        out.push_str(rest);
        out
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Start of the trailing `[-+]?[0-9.]+` run of `s`
fn numeric_suffix_start(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut start = bytes.len();
    while start > 0 && (bytes[start - 1].is_ascii_digit() || bytes[start - 1] == b'.') {
        start -= 1;
    }
    if start == bytes.len() {
        return None;
    }
    if start > 0 && matches!(bytes[start - 1], b'-' | b'+') {
        start -= 1;
    }
    Some(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter(rem: f64) -> UnitConverter {
        let mut units = UnitConverter::new();
        units.set_rem(rem);
        units
    }

    #[test]
    fn test_numbers_scale_to_pixels() {
        let units = converter(0.5);
        assert_eq!(units.convert_unit(&StyleValue::Number(100.0), "width"), CssValue::from("50px"));
        assert_eq!(units.convert_unit(&StyleValue::Number(3.0), "fontSize"), CssValue::from("1.5px"));
    }

    #[test]
    fn test_unitless_numbers_untouched() {
        let units = converter(0.5);
        assert_eq!(units.convert_unit(&StyleValue::Number(0.8), "opacity"), CssValue::from("0.8"));
        assert_eq!(units.convert_unit(&StyleValue::Number(10.0), "zIndex"), CssValue::from("10"));
    }

    #[test]
    fn test_rem_tokens() {
        let units = converter(2.0);
        let value = StyleValue::from("10rem -1.5rem 0 auto");
        assert_eq!(units.convert_unit(&value, "margin"), CssValue::from("20px -3px 0 auto"));
    }

    #[test]
    fn test_non_rem_strings_verbatim() {
        let units = converter(2.0);
        for raw in ["red", "10px", "lorem", "2remx", "calc(100% - 4px)"] {
            assert_eq!(units.convert_unit(&StyleValue::from(raw), "content"), CssValue::from(raw));
        }
    }

    #[test]
    fn test_fallback_values_order() {
        let value = CssValue::Fallbacks(vec!["-webkit-box".into(), "flex".into()]);
        assert_eq!(value.values(), ["-webkit-box".to_string(), "flex".to_string()]);
    }
}
