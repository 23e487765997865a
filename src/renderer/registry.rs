//! Template registry for storing and selecting named templates

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{RenderContext, RenderError};

/// A named template producing HTML from a render context
pub trait Template: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}

impl<F> Template for F
where
    F: Fn(&RenderContext<'_>) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        self(ctx)
    }
}

/// Registry for storing templates by name
#[derive(Default, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<String, Arc<dyn Template>>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in `split-card` layout pack and
    /// `default` type pack
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::builtin::register(&mut registry);
        registry
    }

    /// Register a template, replacing any template with the same name
    pub fn register(&mut self, name: impl Into<String>, template: impl Template + 'static) {
        self.templates.insert(name.into(), Arc::new(template));
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&dyn Template> {
        self.templates.get(name).map(|t| t.as_ref())
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// First registered template among `names`
    pub fn select<'n>(&self, names: &[&'n str]) -> Result<(&'n str, &dyn Template), RenderError> {
        names
            .iter()
            .find_map(|name| self.get(name).map(|t| (*name, t)))
            .ok_or_else(|| RenderError::TemplateNotFound {
                names: names.iter().map(|n| n.to_string()).collect(),
            })
    }

    /// Get all template names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|s| s.as_str())
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("TemplateRegistry")
            .field("templates", &names)
            .finish()
    }
}
