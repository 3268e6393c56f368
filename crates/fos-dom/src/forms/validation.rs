//! Form Validation
//!
//! Constraint validation state for `<input type="number">` and friends.

use crate::NamedNodeMap;

/// Validity state for form controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    /// The element's value is missing (for required)
    pub value_missing: bool,
    /// The element's value is below the minimum
    pub range_underflow: bool,
    /// The element's value is above the maximum
    pub range_overflow: bool,
    /// The element's value doesn't match step
    pub step_mismatch: bool,
    /// The user typed something the control cannot convert
    pub bad_input: bool,
}

impl ValidityState {
    /// Check if the element is valid
    pub fn is_valid(&self) -> bool {
        !self.value_missing
            && !self.range_underflow
            && !self.range_overflow
            && !self.step_mismatch
            && !self.bad_input
    }
}

/// Validation constraints read from content attributes
#[derive(Debug, Clone, Default)]
pub struct ValidationConstraints {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl ValidationConstraints {
    pub fn from_attributes(attrs: &NamedNodeMap) -> Self {
        let number = |name: &str| attrs.get(name).and_then(|v| v.trim().parse::<f64>().ok());
        Self {
            required: attrs.has("required"),
            min: number("min"),
            max: number("max"),
            step: number("step").filter(|s| *s > 0.0),
        }
    }

    /// Validate raw text typed into a number control
    pub fn validate_number_input(&self, raw: &str) -> ValidityState {
        let raw = raw.trim();
        if raw.is_empty() {
            return ValidityState {
                value_missing: self.required,
                ..Default::default()
            };
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => self.validate_number(value),
            _ => ValidityState {
                bad_input: true,
                ..Default::default()
            },
        }
    }

    /// Validate a numeric value
    pub fn validate_number(&self, value: f64) -> ValidityState {
        let mut state = ValidityState::default();

        if let Some(min) = self.min {
            if value < min {
                state.range_underflow = true;
            }
        }

        if let Some(max) = self.max {
            if value > max {
                state.range_overflow = true;
            }
        }

        if let Some(step) = self.step {
            let base = self.min.unwrap_or(0.0);
            let diff = value - base;
            if (diff % step).abs() > 1e-10 {
                state.step_mismatch = true;
            }
        }

        state
    }
}
