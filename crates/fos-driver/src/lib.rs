//! fOS Platform Driver
//!
//! Bridges a component renderer to the fOS document:
//! - Node construction and tree mutation
//! - Prop application (attributes, property slots, listeners)
//! - Inline styles with flexbox prefixing and rem scaling
//! - Event overrides for synthetic events such as `tap`

mod config;
mod driver;
mod events;
pub mod flexbox;
mod platform;
pub mod properties;
mod style;
pub mod units;
mod value;
mod viewport;

pub use config::{ConfigError, DriverConfig};
pub use driver::Driver;
pub use events::{EventAction, EventOverride, EventRegistry};
pub use platform::Platform;
pub use style::transform_styles;
pub use units::{CssValue, UnitConverter};
pub use value::{OrderedMap, PropValue, Props, StyleMap, StyleValue, format_number};
pub use viewport::{DEFAULT_VIEWPORT_WIDTH, Viewport};

pub use fos_dom::{Document, DomError, DomResult, EventListener, NodeId};
