//! Detail view glue: configuration in, resolved context or HTML out

use serde::Serialize;
use serde_json::Value as Json;
use thiserror::Error;

use crate::config::{DisplayParser, PropertyGroupConfig};
use crate::error::ConfigurationError;
use crate::instance::ObjectRef;
use crate::renderer::{RenderError, Renderer};
use crate::resolver::{ResolvedGroup, Resolver};

/// Errors from building or rendering a detail view
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A view's property display: raw groups or already built ones
#[derive(Debug, Clone)]
pub enum PropertyDisplay {
    Raw(Json),
    Groups(Vec<PropertyGroupConfig>),
}

impl From<Json> for PropertyDisplay {
    fn from(raw: Json) -> Self {
        PropertyDisplay::Raw(raw)
    }
}

impl From<Vec<PropertyGroupConfig>> for PropertyDisplay {
    fn from(groups: Vec<PropertyGroupConfig>) -> Self {
        PropertyDisplay::Groups(groups)
    }
}

/// Context a detail page is rendered with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailContext {
    /// Absent when the view has no groups configured
    pub object_detail_groups: Option<Vec<ResolvedGroup>>,
}

/// Detail view for one instance
#[derive(Debug, Clone, Default)]
pub struct ObjectDetailView {
    property_display: Option<PropertyDisplay>,
    parser: DisplayParser,
}

impl ObjectDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property_display(mut self, display: impl Into<PropertyDisplay>) -> Self {
        self.property_display = Some(display.into());
        self
    }

    /// Parse raw configuration with `parser` (e.g. one holding a catalog)
    pub fn with_parser(mut self, parser: DisplayParser) -> Self {
        self.parser = parser;
        self
    }

    /// Configured groups; empty when nothing is configured
    pub fn property_display(&self) -> Result<Vec<PropertyGroupConfig>, ConfigurationError> {
        match &self.property_display {
            None => Ok(Vec::new()),
            Some(PropertyDisplay::Groups(groups)) => Ok(groups.clone()),
            Some(PropertyDisplay::Raw(raw)) => self.parser.parse(raw),
        }
    }

    /// Resolve the configured groups against `instance`
    pub fn context(
        &self,
        resolver: &Resolver<'_>,
        instance: &ObjectRef,
    ) -> Result<DetailContext, ConfigurationError> {
        let groups = self.property_display()?;
        let object_detail_groups = if groups.is_empty() {
            None
        } else {
            Some(resolver.resolve_all(instance, &groups))
        };
        Ok(DetailContext {
            object_detail_groups,
        })
    }

    /// Resolve and render the whole detail block
    pub fn render(
        &self,
        resolver: &Resolver<'_>,
        renderer: &Renderer<'_>,
        instance: &ObjectRef,
    ) -> Result<String, ViewError> {
        let context = self.context(resolver, instance)?;
        let groups = context.object_detail_groups.unwrap_or_default();
        Ok(renderer.render_object_detail(&groups)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Record;
    use crate::schema::SchemaRegistry;
    use serde_json::json;

    fn instance() -> ObjectRef {
        let obj: ObjectRef = Record::builder("Item").pk(1).field("title", "X").build();
        obj
    }

    #[test]
    fn test_no_display_gives_no_groups() {
        let schema = SchemaRegistry::new();
        let context = ObjectDetailView::new()
            .context(&Resolver::new(&schema), &instance())
            .unwrap();
        assert!(context.object_detail_groups.is_none());
    }

    #[test]
    fn test_raw_display_is_parsed_and_resolved() {
        let schema = SchemaRegistry::new();
        let view = ObjectDetailView::new()
            .with_property_display(json!([{"title": "Main", "properties": ["title"]}]));
        let groups = view
            .context(&Resolver::new(&schema), &instance())
            .unwrap()
            .object_detail_groups
            .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].properties[0].value, crate::instance::Value::from("X"));
    }

    #[test]
    fn test_invalid_display_is_a_configuration_error() {
        let schema = SchemaRegistry::new();
        let view = ObjectDetailView::new().with_property_display(json!([{"title": "Main"}]));
        assert!(view.context(&Resolver::new(&schema), &instance()).is_err());
    }
}
