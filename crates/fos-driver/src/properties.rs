//! HTML property classification
//!
//! Static table describing how a prop name maps onto the element: which
//! attribute it writes, whether it must go through the live property slot,
//! and whether its value is boolean, numeric or overloaded-boolean.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::PropValue;

const MUST_USE_PROPERTY: u8 = 0x01;
const HAS_BOOLEAN_VALUE: u8 = 0x04;
const HAS_NUMERIC_VALUE: u8 = 0x08;
const HAS_POSITIVE_NUMERIC_VALUE: u8 = 0x10 | HAS_NUMERIC_VALUE;
const HAS_OVERLOADED_BOOLEAN_VALUE: u8 = 0x20;

#[rustfmt::skip]
const PROPERTIES: &[(&str, u8)] = &[
    ("accept", 0),
    ("acceptCharset", 0),
    ("accessKey", 0),
    ("action", 0),
    ("allowFullScreen", HAS_BOOLEAN_VALUE),
    ("alt", 0),
    ("async", HAS_BOOLEAN_VALUE),
    ("autoComplete", 0),
    ("autoFocus", HAS_BOOLEAN_VALUE),
    ("autoPlay", HAS_BOOLEAN_VALUE),
    ("capture", HAS_OVERLOADED_BOOLEAN_VALUE),
    ("cellPadding", 0),
    ("cellSpacing", 0),
    ("charSet", 0),
    ("checked", MUST_USE_PROPERTY | HAS_BOOLEAN_VALUE),
    ("cite", 0),
    ("className", 0),
    ("cols", HAS_POSITIVE_NUMERIC_VALUE),
    ("colSpan", 0),
    ("content", 0),
    ("contentEditable", 0),
    ("controls", HAS_BOOLEAN_VALUE),
    ("coords", 0),
    ("crossOrigin", 0),
    ("data", 0),
    ("dateTime", 0),
    ("default", HAS_BOOLEAN_VALUE),
    ("defer", HAS_BOOLEAN_VALUE),
    ("dir", 0),
    ("disabled", HAS_BOOLEAN_VALUE),
    ("download", HAS_OVERLOADED_BOOLEAN_VALUE),
    ("draggable", 0),
    ("encType", 0),
    ("form", 0),
    ("formAction", 0),
    ("formEncType", 0),
    ("formMethod", 0),
    ("formNoValidate", HAS_BOOLEAN_VALUE),
    ("formTarget", 0),
    ("frameBorder", 0),
    ("headers", 0),
    ("height", 0),
    ("hidden", HAS_BOOLEAN_VALUE),
    ("high", 0),
    ("href", 0),
    ("hrefLang", 0),
    ("htmlFor", 0),
    ("httpEquiv", 0),
    ("id", 0),
    ("inputMode", 0),
    ("integrity", 0),
    ("itemID", 0),
    ("itemProp", 0),
    ("itemRef", 0),
    ("itemScope", HAS_BOOLEAN_VALUE),
    ("itemType", 0),
    ("kind", 0),
    ("label", 0),
    ("lang", 0),
    ("list", 0),
    ("loop", HAS_BOOLEAN_VALUE),
    ("low", 0),
    ("manifest", 0),
    ("max", 0),
    ("maxLength", 0),
    ("media", 0),
    ("method", 0),
    ("min", 0),
    ("minLength", 0),
    ("multiple", MUST_USE_PROPERTY | HAS_BOOLEAN_VALUE),
    ("muted", MUST_USE_PROPERTY | HAS_BOOLEAN_VALUE),
    ("name", 0),
    ("nonce", 0),
    ("noValidate", HAS_BOOLEAN_VALUE),
    ("open", HAS_BOOLEAN_VALUE),
    ("optimum", 0),
    ("pattern", 0),
    ("placeholder", 0),
    ("playsInline", HAS_BOOLEAN_VALUE),
    ("poster", 0),
    ("preload", 0),
    ("readOnly", HAS_BOOLEAN_VALUE),
    ("referrerPolicy", 0),
    ("rel", 0),
    ("required", HAS_BOOLEAN_VALUE),
    ("reversed", HAS_BOOLEAN_VALUE),
    ("role", 0),
    ("rows", HAS_POSITIVE_NUMERIC_VALUE),
    ("rowSpan", HAS_NUMERIC_VALUE),
    ("sandbox", 0),
    ("scope", 0),
    ("scoped", HAS_BOOLEAN_VALUE),
    ("scrolling", 0),
    ("seamless", HAS_BOOLEAN_VALUE),
    ("selected", MUST_USE_PROPERTY | HAS_BOOLEAN_VALUE),
    ("shape", 0),
    ("size", HAS_POSITIVE_NUMERIC_VALUE),
    ("sizes", 0),
    ("span", HAS_POSITIVE_NUMERIC_VALUE),
    ("spellCheck", 0),
    ("src", 0),
    ("srcDoc", 0),
    ("srcLang", 0),
    ("srcSet", 0),
    ("start", HAS_NUMERIC_VALUE),
    ("step", 0),
    ("summary", 0),
    ("tabIndex", 0),
    ("target", 0),
    ("title", 0),
    ("type", 0),
    ("useMap", 0),
    ("value", MUST_USE_PROPERTY),
    ("width", 0),
    ("wrap", 0),
];

/// Attribute names that are not simply the lower-cased prop name
const ATTRIBUTE_NAMES: &[(&str, &str)] = &[
    ("acceptCharset", "accept-charset"),
    ("className", "class"),
    ("htmlFor", "for"),
    ("httpEquiv", "http-equiv"),
];

/// Props consumed by the renderer or the driver itself
const RESERVED_PROPS: &[&str] = &[
    "children",
    "dangerouslySetInnerHTML",
    "key",
    "ref",
    "style",
    "suppressContentEditableWarning",
];

/// Classification entry for a known HTML property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDetail {
    pub attribute_name: String,
    pub property_name: String,
    pub must_use_property: bool,
    pub has_boolean_value: bool,
    pub has_numeric_value: bool,
    pub has_positive_numeric_value: bool,
    pub has_overloaded_boolean_value: bool,
}

impl PropertyDetail {
    fn new(name: &str, flags: u8) -> Self {
        let attribute_name = ATTRIBUTE_NAMES
            .iter()
            .find(|(prop, _)| *prop == name)
            .map_or_else(|| name.to_ascii_lowercase(), |(_, attr)| attr.to_string());
        let has = |flag: u8| flags & flag == flag;

        Self {
            attribute_name,
            property_name: name.to_string(),
            must_use_property: has(MUST_USE_PROPERTY),
            has_boolean_value: has(HAS_BOOLEAN_VALUE),
            has_numeric_value: has(HAS_NUMERIC_VALUE),
            has_positive_numeric_value: has(HAS_POSITIVE_NUMERIC_VALUE),
            has_overloaded_boolean_value: has(HAS_OVERLOADED_BOOLEAN_VALUE),
        }
    }
}

static PROPERTY_DETAILS: LazyLock<HashMap<&'static str, PropertyDetail>> = LazyLock::new(|| {
    PROPERTIES
        .iter()
        .map(|&(name, flags)| (name, PropertyDetail::new(name, flags)))
        .collect()
});

/// Classification entry for `name`, if it is a known property
pub fn get_property_detail(name: &str) -> Option<&'static PropertyDetail> {
    PROPERTY_DETAILS.get(name)
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_PROPS.contains(&name)
}

/// Whether `value` for a classified `name` means "clear it"
pub fn should_set_null_value(name: &str, value: &PropValue) -> bool {
    if value.is_null() {
        return true;
    }
    let Some(detail) = get_property_detail(name) else {
        return false;
    };

    (detail.has_boolean_value && !value.is_truthy())
        || (detail.has_numeric_value && value.to_number().is_nan())
        || (detail.has_positive_numeric_value && value.to_number() < 1.0)
        || (detail.has_overloaded_boolean_value && *value == PropValue::Bool(false))
}

/// Whether `value` can be written to the element under `name` at all
pub fn should_set_attribute(name: &str, value: &PropValue) -> bool {
    if is_reserved(name) {
        return false;
    }

    match value {
        PropValue::Null => true,
        PropValue::Bool(_) => {
            if get_property_detail(name).is_some() {
                return true;
            }
            let lower = name.to_ascii_lowercase();
            lower.starts_with("data-") || lower.starts_with("aria-")
        }
        PropValue::Number(_) | PropValue::Str(_) | PropValue::Object(_) => true,
        PropValue::Style(_) | PropValue::Handler(_) => false,
    }
}
