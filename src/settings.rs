//! Presentation settings
//!
//! Which layout and type template packs to render with, how multi-line text
//! is broken, and how icon classes are built for the chosen icon library.
//!
//! ```toml
//! layout_pack = "split-card"
//! types_pack = "default"
//! property_text_newline = "linebreaks"
//! icons_library = "fontawesome"
//! icons_type = "solid"
//!
//! [named_icons]
//! boolean-true = "thumbs-up"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How newlines in `text` values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlineMode {
    /// Every newline becomes `<br>`
    #[default]
    Linebreaksbr,
    /// Blank lines separate `<p>` paragraphs, single newlines become `<br>`
    Linebreaks,
}

/// Icon font the templates emit classes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconLibrary {
    #[default]
    Bootstrap,
    FontAwesome,
}

impl IconLibrary {
    fn default_class(self) -> &'static str {
        match self {
            IconLibrary::Bootstrap => "bi",
            IconLibrary::FontAwesome => "fa",
        }
    }

    fn default_type(self) -> Option<&'static str> {
        match self {
            IconLibrary::Bootstrap => None,
            IconLibrary::FontAwesome => Some("regular"),
        }
    }

    fn default_prefix(self) -> &'static str {
        self.default_class()
    }

    fn named_icons(self) -> &'static [(&'static str, &'static str)] {
        match self {
            IconLibrary::Bootstrap => BOOTSTRAP_ICONS,
            IconLibrary::FontAwesome => FONTAWESOME_ICONS,
        }
    }
}

/// Icons the built-in templates refer to by role
const BOOTSTRAP_ICONS: &[(&str, &str)] = &[
    ("boolean-true", "check-circle-fill"),
    ("boolean-false", "x-circle-fill"),
    ("property-detail", "info-circle"),
    ("text-icon", "journal-text"),
];

const FONTAWESOME_ICONS: &[(&str, &str)] = &[
    ("boolean-true", "circle-check"),
    ("boolean-false", "circle-xmark"),
    ("property-detail", "circle-info"),
    ("text-icon", "file-lines"),
];

/// Global presentation settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    layout_pack: Option<String>,
    types_pack: Option<String>,
    pub property_text_newline: NewlineMode,
    pub icons_library: IconLibrary,
    icons_class: Option<String>,
    /// `Some(None)` disables the type even if the library has one
    icons_type: Option<Option<String>>,
    icons_prefix: Option<String>,
    named_icons: Option<HashMap<String, String>>,
}

/// TOML structure for deserializing settings
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSettings {
    layout_pack: Option<String>,
    types_pack: Option<String>,
    #[serde(default)]
    property_text_newline: NewlineMode,
    #[serde(default)]
    icons_library: IconLibrary,
    icons_class: Option<String>,
    icons_type: Option<String>,
    icons_prefix: Option<String>,
    named_icons: Option<HashMap<String, String>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string; every key is optional
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;
        Ok(Settings {
            layout_pack: parsed.layout_pack,
            types_pack: parsed.types_pack,
            property_text_newline: parsed.property_text_newline,
            icons_library: parsed.icons_library,
            icons_class: parsed.icons_class,
            icons_type: parsed
                .icons_type
                .map(|t| if t.is_empty() { None } else { Some(t) }),
            icons_prefix: parsed.icons_prefix,
            named_icons: parsed.named_icons,
        })
    }

    pub fn with_layout_pack(mut self, pack: impl Into<String>) -> Self {
        self.layout_pack = Some(pack.into());
        self
    }

    pub fn with_types_pack(mut self, pack: impl Into<String>) -> Self {
        self.types_pack = Some(pack.into());
        self
    }

    pub fn with_newline_mode(mut self, mode: NewlineMode) -> Self {
        self.property_text_newline = mode;
        self
    }

    pub fn with_icons_library(mut self, library: IconLibrary) -> Self {
        self.icons_library = library;
        self
    }

    pub fn with_icons_class(mut self, class: impl Into<String>) -> Self {
        self.icons_class = Some(class.into());
        self
    }

    /// Set the icon type; `None` disables it regardless of the library
    pub fn with_icons_type(mut self, kind: Option<&str>) -> Self {
        self.icons_type = Some(kind.map(str::to_string));
        self
    }

    pub fn with_icons_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.icons_prefix = Some(prefix.into());
        self
    }

    /// Replace the named icon table
    pub fn with_named_icons<I, K, V>(mut self, icons: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.named_icons = Some(icons.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    pub fn layout_pack(&self) -> &str {
        self.layout_pack.as_deref().unwrap_or("split-card")
    }

    pub fn types_pack(&self) -> &str {
        self.types_pack.as_deref().unwrap_or("default")
    }

    pub fn icons_class(&self) -> &str {
        self.icons_class
            .as_deref()
            .unwrap_or_else(|| self.icons_library.default_class())
    }

    pub fn icons_type(&self) -> Option<&str> {
        match &self.icons_type {
            Some(explicit) => explicit.as_deref(),
            None => self.icons_library.default_type(),
        }
    }

    pub fn icons_prefix(&self) -> &str {
        self.icons_prefix
            .as_deref()
            .unwrap_or_else(|| self.icons_library.default_prefix())
    }

    /// Icon name for a role such as `boolean-true`
    pub fn named_icon(&self, name: &str) -> Option<&str> {
        match &self.named_icons {
            Some(icons) => icons.get(name).map(String::as_str),
            None => self
                .icons_library
                .named_icons()
                .iter()
                .find(|(role, _)| *role == name)
                .map(|(_, icon)| *icon),
        }
    }

    /// Full class list for an icon: `bi bi-gear`, `fa-regular fa-gear`
    pub fn build_icon_class(&self, icon: &str) -> String {
        match self.icons_type() {
            Some(kind) => format!("{}-{} {}-{}", self.icons_class(), kind, self.icons_prefix(), icon),
            None => format!("{} {}-{}", self.icons_class(), self.icons_prefix(), icon),
        }
    }

    /// Class list for a named icon, or an empty string for unknown names
    pub fn build_named_icon_class(&self, name: &str) -> String {
        self.named_icon(name)
            .map(|icon| self.build_icon_class(icon))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.layout_pack(), "split-card");
        assert_eq!(settings.types_pack(), "default");
        assert_eq!(settings.property_text_newline, NewlineMode::Linebreaksbr);
        assert_eq!(settings.icons_library, IconLibrary::Bootstrap);
        assert_eq!(settings.icons_class(), "bi");
        assert_eq!(settings.icons_type(), None);
        assert_eq!(settings.icons_prefix(), "bi");
    }

    #[test]
    fn test_fontawesome_defaults() {
        let settings = Settings::new().with_icons_library(IconLibrary::FontAwesome);
        assert_eq!(settings.icons_class(), "fa");
        assert_eq!(settings.icons_type(), Some("regular"));
        assert_eq!(settings.icons_prefix(), "fa");
        assert_eq!(settings.named_icon("text-icon"), Some("file-lines"));
    }

    #[test]
    fn test_build_icon_class() {
        assert_eq!(Settings::default().build_icon_class("check-circle-fill"), "bi bi-check-circle-fill");

        let fa = Settings::new().with_icons_library(IconLibrary::FontAwesome);
        assert_eq!(fa.build_icon_class("circle-check"), "fa-regular fa-circle-check");

        let custom = Settings::new()
            .with_icons_class("icon")
            .with_icons_type(None)
            .with_icons_prefix("icon");
        assert_eq!(custom.build_icon_class("star"), "icon icon-star");

        let typed = Settings::new()
            .with_icons_class("fa")
            .with_icons_type(Some("solid"))
            .with_icons_prefix("fa");
        assert_eq!(typed.build_icon_class("house"), "fa-solid fa-house");
    }

    #[test]
    fn test_explicit_none_type_overrides_library() {
        let settings = Settings::new()
            .with_icons_library(IconLibrary::FontAwesome)
            .with_icons_type(None);
        assert_eq!(settings.icons_type(), None);
        assert_eq!(settings.build_icon_class("gear"), "fa fa-gear");
    }

    #[test]
    fn test_build_named_icon_class() {
        let settings = Settings::default();
        assert_eq!(settings.build_named_icon_class("boolean-true"), "bi bi-check-circle-fill");
        assert_eq!(settings.build_named_icon_class("boolean-false"), "bi bi-x-circle-fill");
        assert_eq!(settings.build_named_icon_class("nonexistent"), "");

        let fa = Settings::new().with_icons_library(IconLibrary::FontAwesome);
        assert_eq!(fa.build_named_icon_class("boolean-false"), "fa-regular fa-circle-xmark");
    }

    #[test]
    fn test_named_icons_replace_table() {
        let settings = Settings::new().with_named_icons([("boolean-true", "my-yes")]);
        assert_eq!(settings.build_named_icon_class("boolean-true"), "bi bi-my-yes");
        assert_eq!(settings.named_icon("boolean-false"), None);
    }

    #[test]
    fn test_load_from_toml() {
        let settings = Settings::from_str(
            r#"
layout_pack = "stacked"
property_text_newline = "linebreaks"
icons_library = "fontawesome"
icons_type = ""

[named_icons]
boolean-true = "thumbs-up"
"#,
        )
        .unwrap();
        assert_eq!(settings.layout_pack(), "stacked");
        assert_eq!(settings.types_pack(), "default");
        assert_eq!(settings.property_text_newline, NewlineMode::Linebreaks);
        assert_eq!(settings.icons_type(), None);
        assert_eq!(settings.build_named_icon_class("boolean-true"), "fa fa-thumbs-up");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Settings::from_str("layout = \"x\"").is_err());
        assert!(Settings::from_str("icons_library = \"material\"").is_err());
    }
}
