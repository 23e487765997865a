//! Object Detail - declarative detail views for model instances
//!
//! This library resolves a declarative list of property groups against a
//! model instance (labels, help text and type tags from the schema; values
//! from the live object graph) and renders the result through a pluggable set
//! of templates.
//!
//! # Example
//!
//! ```rust
//! use object_detail::config::{x, PropertyGroupConfig};
//! use object_detail::instance::{ObjectRef, Record};
//! use object_detail::resolver::Resolver;
//! use object_detail::schema::{FieldDescriptor, FieldKind, ModelSchema, SchemaRegistry};
//! use object_detail::{render_object_detail, DetailConfig};
//!
//! let mut schema = SchemaRegistry::new();
//! schema
//!     .register(
//!         ModelSchema::new("Book")
//!             .with_field(FieldDescriptor::new("title", FieldKind::Char))
//!             .with_field(FieldDescriptor::new("in_print", FieldKind::Boolean)),
//!     )
//!     .unwrap();
//!
//! let book: ObjectRef = Record::builder("Book")
//!     .pk(1)
//!     .field("title", "Dune")
//!     .field("in_print", true)
//!     .build();
//!
//! let groups = vec![PropertyGroupConfig::new("Book", vec![x("title"), x("in_print")]).unwrap()];
//! let html = render_object_detail(&Resolver::new(&schema), &book, &groups, &DetailConfig::default()).unwrap();
//! assert!(html.contains("Dune"));
//! assert!(html.contains("bi bi-check-circle-fill"));
//! ```

pub mod config;
pub mod error;
pub mod instance;
pub mod renderer;
pub mod resolver;
pub mod routes;
pub mod schema;
pub mod settings;
pub mod text;
pub mod view;

pub use config::{
    parse_property_display, parse_property_display_toml, x, BadgeConfig, LinkConfig,
    PropertyConfig, PropertyGroupConfig,
};
pub use error::ConfigurationError;
pub use instance::{Object, ObjectRef, Record, Value};
pub use renderer::{RenderError, Renderer, TemplateRegistry};
pub use resolver::{ResolvedGroup, ResolvedProperty, Resolver};
pub use routes::{RouteResolver, Router};
pub use schema::{SchemaProvider, SchemaRegistry, TypeTag};
pub use settings::Settings;
pub use text::DisplayText;

/// Configuration for the resolve-and-render pipeline
#[derive(Debug, Clone)]
pub struct DetailConfig {
    /// Presentation settings (packs, icons, newline mode)
    pub settings: Settings,
    /// Templates to render with
    pub templates: TemplateRegistry,
    /// Locale deferred text is evaluated for
    pub locale: Option<String>,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            templates: TemplateRegistry::with_builtins(),
            locale: None,
        }
    }
}

impl DetailConfig {
    /// Create a new configuration with the built-in templates
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Renderer over this configuration
    pub fn renderer(&self) -> Renderer<'_> {
        let renderer = Renderer::new(&self.templates, &self.settings);
        match &self.locale {
            Some(locale) => renderer.with_locale(locale),
            None => renderer,
        }
    }
}

/// Resolve `groups` against `instance` and render them as one HTML block
pub fn render_object_detail(
    resolver: &Resolver<'_>,
    instance: &ObjectRef,
    groups: &[PropertyGroupConfig],
    config: &DetailConfig,
) -> Result<String, RenderError> {
    let resolved = resolver.resolve_all(instance, groups);
    config.renderer().render_object_detail(&resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDescriptor, FieldKind, ModelSchema};

    fn schema() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                ModelSchema::new("Item")
                    .with_field(FieldDescriptor::new("title", FieldKind::Char))
                    .with_field(
                        FieldDescriptor::new("notes", FieldKind::Text).with_help_text("Free text"),
                    ),
            )
            .unwrap();
        registry
    }

    fn item() -> ObjectRef {
        let item: ObjectRef = Record::builder("Item")
            .pk(3)
            .field("title", "Widget")
            .field("notes", "line one\nline two")
            .build();
        item
    }

    #[test]
    fn test_render_pipeline() {
        let registry = schema();
        let groups = vec![PropertyGroupConfig::new("General", ["title", "notes"])
            .unwrap()
            .with_icon("gear")];
        let html =
            render_object_detail(&Resolver::new(&registry), &item(), &groups, &DetailConfig::new())
                .unwrap();
        assert!(html.starts_with("<div class=\"object-detail\">"));
        assert!(html.contains("bi bi-gear"));
        assert!(html.contains("General"));
        assert!(html.contains("Widget"));
        assert!(html.contains("line one<br>line two"));
        assert!(html.contains("Free text"));
        assert!(html.contains("bi bi-info-circle"));
    }

    #[test]
    fn test_render_with_locale() {
        let registry = schema();
        let title = DisplayText::lazy(|locale: Option<&str>| match locale {
            Some("de") => "Allgemein".to_string(),
            _ => "General".to_string(),
        });
        let groups = vec![PropertyGroupConfig::new(title, ["title"]).unwrap()];
        let config = DetailConfig::new().with_locale("de");
        let html = render_object_detail(&Resolver::new(&registry), &item(), &groups, &config).unwrap();
        assert!(html.contains("Allgemein"));
    }

    #[test]
    fn test_missing_layout_pack_is_an_error() {
        let registry = schema();
        let groups = vec![PropertyGroupConfig::new("General", ["title"]).unwrap()];
        let config = DetailConfig::new().with_settings(Settings::new().with_layout_pack("stacked"));
        let result = render_object_detail(&Resolver::new(&registry), &item(), &groups, &config);
        assert!(matches!(result, Err(RenderError::TemplateNotFound { .. })));
    }
}
