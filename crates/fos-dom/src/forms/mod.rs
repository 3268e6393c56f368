//! Form Controls
//!
//! Constraint validation state for input elements.

mod validation;

pub use validation::{ValidationConstraints, ValidityState};
