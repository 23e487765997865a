//! Per-property configuration

use super::link::{BadgeConfig, LinkConfig};
use super::path::PropertyPath;
use crate::error::ConfigurationError;
use crate::text::DisplayText;

/// One property to display, with optional overrides
///
/// Built through [`PropertyConfig::new`] or the [`x`] builder. The path is
/// validated on construction, so a `PropertyConfig` always holds a well-formed
/// path.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyConfig {
    path: PropertyPath,
    title: Option<DisplayText>,
    detail: Option<DisplayText>,
    kind: Option<String>,
    template: Option<String>,
    link: Option<LinkConfig>,
    badge: Option<BadgeConfig>,
}

impl PropertyConfig {
    pub fn new(path: &str) -> Result<Self, ConfigurationError> {
        Ok(Self::from_path(PropertyPath::parse(path)?))
    }

    pub fn from_path(path: PropertyPath) -> Self {
        Self {
            path,
            title: None,
            detail: None,
            kind: None,
            template: None,
            link: None,
            badge: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<DisplayText>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<DisplayText>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Override the type tag used to pick the value template
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<LinkConfig>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_badge(mut self, badge: impl Into<BadgeConfig>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    pub fn title(&self) -> Option<&DisplayText> {
        self.title.as_ref()
    }

    pub fn detail(&self) -> Option<&DisplayText> {
        self.detail.as_ref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn link(&self) -> Option<&LinkConfig> {
        self.link.as_ref()
    }

    pub fn badge(&self) -> Option<&BadgeConfig> {
        self.badge.as_ref()
    }
}

/// Deferred-validation builder returned by [`x`]
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    path: String,
    title: Option<DisplayText>,
    detail: Option<DisplayText>,
    kind: Option<String>,
    template: Option<String>,
    link: Option<LinkConfig>,
    badge: Option<BadgeConfig>,
}

/// Shorthand for declaring a property with overrides
///
/// ```rust
/// use object_detail::config::x;
///
/// let prop = x("rating").kind("integer").title("Score").build().unwrap();
/// assert_eq!(prop.kind(), Some("integer"));
/// ```
pub fn x(path: impl Into<String>) -> PropertyBuilder {
    PropertyBuilder {
        path: path.into(),
        title: None,
        detail: None,
        kind: None,
        template: None,
        link: None,
        badge: None,
    }
}

impl PropertyBuilder {
    pub fn title(mut self, title: impl Into<DisplayText>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<DisplayText>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn link(mut self, link: impl Into<LinkConfig>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn badge(mut self, badge: impl Into<BadgeConfig>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    /// Validate the path and produce the config
    pub fn build(self) -> Result<PropertyConfig, ConfigurationError> {
        let mut config = PropertyConfig::new(&self.path)?;
        config.title = self.title;
        config.detail = self.detail;
        config.kind = self.kind;
        config.template = self.template;
        config.link = self.link;
        config.badge = self.badge;
        Ok(config)
    }
}
