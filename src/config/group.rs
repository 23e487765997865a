//! Property groups and entry normalization

use serde_json::Value as Json;

use super::property::{PropertyBuilder, PropertyConfig};
use super::raw::DisplayParser;
use crate::error::ConfigurationError;
use crate::text::DisplayText;

/// A property as declared: bare path, builder, finished config or raw mapping
#[derive(Debug, Clone)]
pub enum PropertyEntry {
    Path(String),
    Builder(PropertyBuilder),
    Config(PropertyConfig),
    Raw(Json),
}

impl PropertyEntry {
    /// Normalize into a validated [`PropertyConfig`]
    pub fn into_config(self) -> Result<PropertyConfig, ConfigurationError> {
        self.normalize(&DisplayParser::new())
    }

    pub(crate) fn normalize(
        self,
        parser: &DisplayParser,
    ) -> Result<PropertyConfig, ConfigurationError> {
        match self {
            PropertyEntry::Path(path) => PropertyConfig::new(&path),
            PropertyEntry::Builder(builder) => builder.build(),
            PropertyEntry::Config(config) => Ok(config),
            PropertyEntry::Raw(raw) => parser.property(&raw),
        }
    }
}

impl From<&str> for PropertyEntry {
    fn from(path: &str) -> Self {
        PropertyEntry::Path(path.to_string())
    }
}

impl From<String> for PropertyEntry {
    fn from(path: String) -> Self {
        PropertyEntry::Path(path)
    }
}

impl From<PropertyBuilder> for PropertyEntry {
    fn from(builder: PropertyBuilder) -> Self {
        PropertyEntry::Builder(builder)
    }
}

impl From<PropertyConfig> for PropertyEntry {
    fn from(config: PropertyConfig) -> Self {
        PropertyEntry::Config(config)
    }
}

impl From<Json> for PropertyEntry {
    fn from(raw: Json) -> Self {
        PropertyEntry::Raw(raw)
    }
}

/// A titled group of properties
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroupConfig {
    pub title: DisplayText,
    pub description: Option<DisplayText>,
    pub icon: Option<String>,
    pub properties: Vec<PropertyConfig>,
}

impl PropertyGroupConfig {
    /// Build a group, normalizing each entry in declared order
    pub fn new<I, E>(title: impl Into<DisplayText>, entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = E>,
        E: Into<PropertyEntry>,
    {
        let properties = entries
            .into_iter()
            .map(|e| e.into().into_config())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            title: title.into(),
            description: None,
            icon: None,
            properties,
        })
    }

    pub fn with_description(mut self, description: impl Into<DisplayText>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Build a group from a raw mapping
    pub fn from_value(raw: &Json) -> Result<Self, ConfigurationError> {
        DisplayParser::new().group(raw)
    }
}
