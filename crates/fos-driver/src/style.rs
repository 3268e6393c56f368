//! Inline style transformation

use crate::flexbox;
use crate::units::{CssValue, UnitConverter};
use crate::value::{OrderedMap, StyleMap};

/// Resolve a declared style map into concrete declarations
///
/// Flex properties are expanded through the flexbox table and applied as
/// written; everything else goes through unit conversion. Keys of the
/// result are unique, so each declaration is applied exactly once.
pub fn transform_styles(styles: &StyleMap, units: &UnitConverter) -> OrderedMap<CssValue> {
    let mut transformed = OrderedMap::with_capacity(styles.len());

    for (prop, value) in styles.iter() {
        if !flexbox::expand(prop, value, &mut transformed) {
            transformed.insert(prop, units.convert_unit(value, prop));
        }
    }

    transformed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_flex_and_units() {
        let mut units = UnitConverter::new();
        units.set_rem(0.5);
        let styles = StyleMap::new()
            .with("display", "flex")
            .with("flexDirection", "row")
            .with("width", 100);

        let out = transform_styles(&styles, &units);
        assert_eq!(
            out.keys().collect::<Vec<_>>(),
            vec![
                "display",
                "webkitBoxOrient",
                "webkitFlexDirection",
                "flexDirection",
                "width"
            ]
        );
        assert_eq!(out.get("width"), Some(&CssValue::from("50px")));
        assert_eq!(out.get("flexDirection"), Some(&CssValue::from("row")));
    }

    #[test]
    fn test_later_declaration_overrides_expansion() {
        let units = UnitConverter::new();
        let styles = StyleMap::new()
            .with("alignItems", "center")
            .with("webkitBoxAlign", "end");

        let out = transform_styles(&styles, &units);
        assert_eq!(out.get("webkitBoxAlign"), Some(&CssValue::from("end")));
        assert_eq!(out.len(), 3);
    }
}
