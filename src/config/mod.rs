//! Declarative display configuration
//!
//! Groups of properties are declared in code (with [`x`] and
//! [`PropertyGroupConfig::new`]) or parsed from raw JSON/TOML trees. Either
//! way every path is validated up front, so resolution never sees a malformed
//! configuration.

mod group;
mod link;
mod path;
mod property;
mod raw;

pub use group::{PropertyEntry, PropertyGroupConfig};
pub use link::{BadgeConfig, ColorFn, LinkConfig};
pub use path::{PropertyPath, SEGMENT_DELIMITER};
pub use property::{x, PropertyBuilder, PropertyConfig};
pub use raw::{
    parse_property_display, parse_property_display_json, parse_property_display_toml,
    DisplayParser,
};
