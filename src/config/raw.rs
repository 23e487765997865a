//! Parse display configuration from raw JSON/TOML trees
//!
//! A display configuration is a list of groups:
//!
//! ```toml
//! [[groups]]
//! title = "Overview"
//! icon = "info-circle"
//! properties = [
//!     "title",
//!     { path = "rating", type = "integer" },
//!     { path = "owner", link = "user-detail", badge = "info" },
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value as Json};

use super::group::PropertyGroupConfig;
use super::link::{BadgeConfig, LinkConfig};
use super::property::PropertyConfig;
use crate::error::ConfigurationError;
use crate::text::{Catalog, DisplayText};

const PROPERTY_KEYS: &[&str] = &["path", "title", "detail", "type", "template", "link", "badge"];
const GROUP_KEYS: &[&str] = &["title", "description", "icon", "properties"];
const LINK_KEYS: &[&str] = &["url", "args", "kwargs"];
const BADGE_KEYS: &[&str] = &["color", "color_map", "label_map", "pill"];

/// Parse a list of raw group mappings
pub fn parse_property_display(raw: &Json) -> Result<Vec<PropertyGroupConfig>, ConfigurationError> {
    DisplayParser::new().parse(raw)
}

/// Parse a TOML display document (a `groups` array of tables)
pub fn parse_property_display_toml(
    content: &str,
) -> Result<Vec<PropertyGroupConfig>, ConfigurationError> {
    DisplayParser::new().parse_toml(content)
}

/// Parse a JSON display document (a top-level array of groups)
pub fn parse_property_display_json(
    content: &str,
) -> Result<Vec<PropertyGroupConfig>, ConfigurationError> {
    DisplayParser::new().parse_json(content)
}

/// Turns raw mappings into validated configuration
///
/// With a catalog attached, every title, detail and description becomes a
/// deferred message looked up at render time.
#[derive(Debug, Clone, Default)]
pub struct DisplayParser {
    catalog: Option<Arc<Catalog>>,
}

impl DisplayParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Read a display file, choosing TOML or JSON by extension
    pub fn parse_file(&self, path: &Path) -> Result<Vec<PropertyGroupConfig>, ConfigurationError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.parse_json(&content),
            _ => self.parse_toml(&content),
        }
    }

    pub fn parse_toml(&self, content: &str) -> Result<Vec<PropertyGroupConfig>, ConfigurationError> {
        let doc: Json = toml::from_str(content)?;
        match doc.get("groups") {
            Some(groups) => self.parse(groups),
            None => Ok(Vec::new()),
        }
    }

    pub fn parse_json(&self, content: &str) -> Result<Vec<PropertyGroupConfig>, ConfigurationError> {
        let doc: Json = serde_json::from_str(content)?;
        self.parse(&doc)
    }

    pub fn parse(&self, raw: &Json) -> Result<Vec<PropertyGroupConfig>, ConfigurationError> {
        let groups = raw
            .as_array()
            .ok_or_else(|| ConfigurationError::invalid_type("groups", "a list", raw))?;
        groups.iter().map(|g| self.group(g)).collect()
    }

    pub fn group(&self, raw: &Json) -> Result<PropertyGroupConfig, ConfigurationError> {
        let map = mapping(raw, "groups", GROUP_KEYS, "group")?;

        let title = self
            .text(map, "title")?
            .ok_or(ConfigurationError::MissingKey {
                key: "title",
                context: "group",
            })?;
        let entries = match map.get("properties") {
            Some(Json::Array(items)) => items,
            Some(other) => {
                return Err(ConfigurationError::invalid_type(
                    "properties",
                    "a list",
                    other,
                ))
            }
            None => {
                return Err(ConfigurationError::MissingKey {
                    key: "properties",
                    context: "group",
                })
            }
        };
        let properties = entries
            .iter()
            .map(|entry| self.property(entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PropertyGroupConfig {
            title,
            description: self.text(map, "description")?,
            icon: string(map, "icon")?,
            properties,
        })
    }

    /// Normalize one property entry: a bare path string or a mapping
    pub fn property(&self, raw: &Json) -> Result<PropertyConfig, ConfigurationError> {
        let map = match raw {
            Json::String(path) => return PropertyConfig::new(path),
            Json::Object(map) => map,
            other => return Err(ConfigurationError::invalid_property(other)),
        };
        check_keys(map, PROPERTY_KEYS, "property")?;

        let path = string(map, "path")?.ok_or(ConfigurationError::MissingKey {
            key: "path",
            context: "property",
        })?;
        let mut config = PropertyConfig::new(&path)?;
        if let Some(title) = self.text(map, "title")? {
            config = config.with_title(title);
        }
        if let Some(detail) = self.text(map, "detail")? {
            config = config.with_detail(detail);
        }
        if let Some(kind) = string(map, "type")? {
            config = config.with_kind(kind);
        }
        if let Some(template) = string(map, "template")? {
            config = config.with_template(template);
        }
        if let Some(link) = map.get("link").filter(|v| !v.is_null()) {
            config = config.with_link(link_config(link)?);
        }
        if let Some(badge) = map.get("badge").filter(|v| !v.is_null()) {
            config = config.with_badge(badge_config(badge)?);
        }
        Ok(config)
    }

    fn text(
        &self,
        map: &Map<String, Json>,
        key: &str,
    ) -> Result<Option<DisplayText>, ConfigurationError> {
        Ok(string(map, key)?.map(|s| match &self.catalog {
            Some(catalog) => catalog.lazy(s),
            None => DisplayText::Plain(s),
        }))
    }
}

fn mapping<'a>(
    raw: &'a Json,
    key: &str,
    allowed: &[&str],
    context: &'static str,
) -> Result<&'a Map<String, Json>, ConfigurationError> {
    let map = raw
        .as_object()
        .ok_or_else(|| ConfigurationError::invalid_type(key, "a mapping", raw))?;
    check_keys(map, allowed, context)?;
    Ok(map)
}

fn check_keys(
    map: &Map<String, Json>,
    allowed: &[&str],
    context: &'static str,
) -> Result<(), ConfigurationError> {
    match map.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(ConfigurationError::unknown_key(key.as_str(), context)),
        None => Ok(()),
    }
}

/// Optional string value; null counts as absent
fn string(map: &Map<String, Json>, key: &str) -> Result<Option<String>, ConfigurationError> {
    match map.get(key) {
        None | Some(Json::Null) => Ok(None),
        Some(Json::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ConfigurationError::invalid_type(key, "a string", other)),
    }
}

fn string_map(
    map: &Map<String, Json>,
    key: &str,
) -> Result<Option<BTreeMap<String, String>>, ConfigurationError> {
    let raw = match map.get(key) {
        None | Some(Json::Null) => return Ok(None),
        Some(Json::Object(raw)) => raw,
        Some(other) => return Err(ConfigurationError::invalid_type(key, "a mapping", other)),
    };
    raw.iter()
        .map(|(k, v)| match v {
            Json::String(s) => Ok((k.clone(), s.clone())),
            other => Err(ConfigurationError::invalid_type(k.as_str(), "a string", other)),
        })
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(Some)
}

fn link_config(raw: &Json) -> Result<LinkConfig, ConfigurationError> {
    if let Json::String(url) = raw {
        return Ok(LinkConfig::new(url.as_str()));
    }
    let map = mapping(raw, "link", LINK_KEYS, "link")?;
    let url = string(map, "url")?.ok_or(ConfigurationError::MissingKey {
        key: "url",
        context: "link",
    })?;

    let mut link = LinkConfig::new(url);
    link.args = match map.get("args") {
        None | Some(Json::Null) => None,
        Some(Json::Array(items)) => Some(
            items
                .iter()
                .map(|item| match item {
                    Json::String(s) => Ok(s.clone()),
                    other => Err(ConfigurationError::invalid_type("args", "a list of strings", other)),
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Some(other) => return Err(ConfigurationError::invalid_type("args", "a list", other)),
    };
    link.kwargs = string_map(map, "kwargs")?;
    Ok(link)
}

fn badge_config(raw: &Json) -> Result<BadgeConfig, ConfigurationError> {
    if let Json::String(color) = raw {
        return Ok(BadgeConfig::from(color.as_str()));
    }
    let map = mapping(raw, "badge", BADGE_KEYS, "badge")?;
    let pill = match map.get("pill") {
        None | Some(Json::Null) => false,
        Some(Json::Bool(b)) => *b,
        Some(other) => return Err(ConfigurationError::invalid_type("pill", "a boolean", other)),
    };
    Ok(BadgeConfig {
        color: string(map, "color")?,
        color_map: string_map(map, "color_map")?,
        color_fn: None,
        label_map: string_map(map, "label_map")?,
        pill,
    })
}
