//! Error types for building display configurations

use thiserror::Error;

/// Errors raised while building property and group configurations.
///
/// These are fatal and surface at configuration time, never during resolution.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A property path with no characters
    #[error("property path must not be empty")]
    EmptyPath,

    /// A property path containing an empty segment (e.g. `owner____name`)
    #[error("property path '{path}' has an empty segment at position {position}")]
    EmptySegment { path: String, position: usize },

    /// A property entry that is neither a path, a mapping nor a built config
    #[error("invalid property config: {found}")]
    InvalidProperty { found: String },

    /// A mapping key the configuration model does not know
    #[error("unknown key '{key}' in {context}")]
    UnknownKey { key: String, context: &'static str },

    /// A required mapping key is absent
    #[error("missing required key '{key}' in {context}")]
    MissingKey { key: &'static str, context: &'static str },

    /// A mapping value of the wrong shape
    #[error("invalid value for '{key}': expected {expected}, got {found}")]
    InvalidType {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// Display configuration file is not valid TOML
    #[error("failed to parse display TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Display configuration file is not valid JSON
    #[error("failed to parse display JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Display configuration file could not be read
    #[error("failed to read display configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigurationError {
    /// Create an invalid property error, describing the offending raw value
    pub fn invalid_property(found: impl std::fmt::Display) -> Self {
        Self::InvalidProperty {
            found: found.to_string(),
        }
    }

    /// Create an unknown key error
    pub fn unknown_key(key: impl Into<String>, context: &'static str) -> Self {
        Self::UnknownKey {
            key: key.into(),
            context,
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(
        key: impl Into<String>,
        expected: &'static str,
        found: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidType {
            key: key.into(),
            expected,
            found: found.to_string(),
        }
    }
}
