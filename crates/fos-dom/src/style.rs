//! Inline style declarations (`element.style`)
//!
//! Properties are stored under their CSS (kebab-case) name. Script-facing
//! camelCase names such as `webkitBoxFlex` are normalized on the way in.

/// CSSStyleDeclaration for an element's inline style
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssStyleDeclaration {
    declarations: Vec<(String, String)>,
}

impl CssStyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a property. An empty value removes the declaration.
    ///
    /// Returns the previous value.
    pub fn set_property(&mut self, name: &str, value: &str) -> Option<String> {
        let name = to_css_property_name(name);
        let value = value.trim();
        if value.is_empty() {
            return self.remove_by_css_name(&name);
        }
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => Some(std::mem::replace(v, value.to_string())),
            None => {
                self.declarations.push((name, value.to_string()));
                None
            }
        }
    }

    /// Value of a property given in either naming convention
    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        let name = to_css_property_name(name);
        self.declarations
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        self.remove_by_css_name(&to_css_property_name(name))
    }

    fn remove_by_css_name(&mut self, name: &str) -> Option<String> {
        let index = self.declarations.iter().position(|(n, _)| n == name)?;
        Some(self.declarations.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize as the `style` attribute would read
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace all declarations by parsing `text`
    pub fn set_css_text(&mut self, text: &str) {
        self.declarations.clear();
        for declaration in text.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                let name = name.trim();
                if !name.is_empty() {
                    self.set_property(name, value);
                }
            }
        }
    }
}

const VENDOR_PREFIXES: &[&str] = &["webkit", "moz", "ms"];

/// Convert a camelCase style property to its CSS name
///
/// `backgroundColor` becomes `background-color`, `webkitBoxFlex` becomes
/// `-webkit-box-flex` and `cssFloat` becomes `float`. Names that are
/// already hyphenated pass through unchanged.
pub fn to_css_property_name(name: &str) -> String {
    if name == "cssFloat" {
        return "float".to_string();
    }
    if name.starts_with('-') || !name.chars().any(|c| c.is_ascii_uppercase()) {
        return name.to_string();
    }

    let mut result = String::with_capacity(name.len() + 4);
    let vendor = VENDOR_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    });
    if vendor {
        result.push('-');
    }
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_name_conversion() {
        assert_eq!(to_css_property_name("width"), "width");
        assert_eq!(to_css_property_name("backgroundColor"), "background-color");
        assert_eq!(to_css_property_name("webkitBoxFlex"), "-webkit-box-flex");
        assert_eq!(to_css_property_name("msFlexAlign"), "-ms-flex-align");
        assert_eq!(to_css_property_name("-webkit-flex"), "-webkit-flex");
        assert_eq!(to_css_property_name("cssFloat"), "float");
        // no case boundary after the prefix
        assert_eq!(to_css_property_name("msgColor"), "msg-color");
    }

    #[test]
    fn test_last_assignment_wins() {
        let mut style = CssStyleDeclaration::new();
        style.set_property("display", "-webkit-box");
        style.set_property("display", "flex");

        assert_eq!(style.len(), 1);
        assert_eq!(style.get_property_value("display"), Some("flex"));
    }

    #[test]
    fn test_empty_value_removes() {
        let mut style = CssStyleDeclaration::new();
        style.set_property("fontSize", "12px");
        assert_eq!(style.get_property_value("font-size"), Some("12px"));

        style.set_property("fontSize", "");
        assert!(style.is_empty());
    }

    #[test]
    fn test_css_text_round_trip() {
        let mut style = CssStyleDeclaration::new();
        style.set_css_text("color: red; margin-top : 4px;;");

        assert_eq!(style.get_property_value("marginTop"), Some("4px"));
        assert_eq!(style.css_text(), "color: red; margin-top: 4px;");
    }
}
