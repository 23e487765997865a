//! HTML rendering of resolved groups
//!
//! The renderer only selects templates and hands them a [`RenderContext`];
//! all markup comes from the templates in a [`TemplateRegistry`]. Layout
//! templates are looked up as `<layout_pack>/object_detail.html`,
//! `<layout_pack>/group.html` and `<layout_pack>/property.html`. Value
//! templates are picked per property: an explicit template override, else
//! `<types_pack>/types/<type>.html`, else `<types_pack>/types/default.html`.

mod builtin;
pub mod html;
mod registry;

pub use registry::{Template, TemplateRegistry};

use thiserror::Error;
use tracing::trace;

use crate::resolver::{ResolvedGroup, ResolvedProperty};
use crate::settings::Settings;
use crate::text::DisplayText;

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    /// None of the candidate templates is registered
    #[error("template not found: {}", .names.join(", "))]
    TemplateNotFound { names: Vec<String> },

    /// A template was handed a subject it cannot render
    #[error("template {template} cannot render {subject}")]
    WrongSubject {
        template: String,
        subject: &'static str,
    },
}

/// What a template is rendering
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Groups(&'a [ResolvedGroup]),
    Group(&'a ResolvedGroup),
    Property(&'a ResolvedProperty),
    Value(&'a ResolvedProperty),
}

impl Subject<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Subject::Groups(_) => "a group list",
            Subject::Group(_) => "a group",
            Subject::Property(_) => "a property",
            Subject::Value(_) => "a property value",
        }
    }
}

/// Input handed to a template
pub struct RenderContext<'a> {
    pub renderer: &'a Renderer<'a>,
    pub subject: Subject<'a>,
    /// Name the template was selected under
    pub template: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn settings(&self) -> &Settings {
        self.renderer.settings
    }

    pub fn groups(&self) -> Result<&'a [ResolvedGroup], RenderError> {
        match self.subject {
            Subject::Groups(groups) => Ok(groups),
            _ => Err(self.wrong_subject()),
        }
    }

    pub fn group(&self) -> Result<&'a ResolvedGroup, RenderError> {
        match self.subject {
            Subject::Group(group) => Ok(group),
            _ => Err(self.wrong_subject()),
        }
    }

    /// The property of a property row or property value template
    pub fn property(&self) -> Result<&'a ResolvedProperty, RenderError> {
        match self.subject {
            Subject::Property(prop) | Subject::Value(prop) => Ok(prop),
            _ => Err(self.wrong_subject()),
        }
    }

    /// Evaluate display text for the renderer's locale, HTML-escaped
    pub fn text(&self, text: &DisplayText) -> String {
        html::escape(&text.resolve(self.renderer.locale)).into_owned()
    }

    fn wrong_subject(&self) -> RenderError {
        RenderError::WrongSubject {
            template: self.template.to_string(),
            subject: self.subject.describe(),
        }
    }
}

/// Renders resolved groups through registered templates
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    registry: &'a TemplateRegistry,
    settings: &'a Settings,
    locale: Option<&'a str>,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a TemplateRegistry, settings: &'a Settings) -> Self {
        Self {
            registry,
            settings,
            locale: None,
        }
    }

    /// Evaluate deferred text for `locale`
    pub fn with_locale(mut self, locale: &'a str) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale
    }

    /// Render every group with the layout's object detail template
    pub fn render_object_detail(&self, groups: &[ResolvedGroup]) -> Result<String, RenderError> {
        let name = format!("{}/object_detail.html", self.settings.layout_pack());
        self.render(&[name.as_str()], Subject::Groups(groups))
    }

    pub fn render_group(&self, group: &ResolvedGroup) -> Result<String, RenderError> {
        let name = format!("{}/group.html", self.settings.layout_pack());
        self.render(&[name.as_str()], Subject::Group(group))
    }

    pub fn render_property(&self, prop: &ResolvedProperty) -> Result<String, RenderError> {
        let name = format!("{}/property.html", self.settings.layout_pack());
        self.render(&[name.as_str()], Subject::Property(prop))
    }

    /// Render a property's value with its explicit or type-selected template
    pub fn render_property_value(&self, prop: &ResolvedProperty) -> Result<String, RenderError> {
        match &prop.template {
            Some(template) => self.render(&[template.as_str()], Subject::Value(prop)),
            None => {
                let pack = self.settings.types_pack();
                let typed = format!("{}/types/{}.html", pack, prop.kind);
                let fallback = format!("{}/types/default.html", pack);
                self.render(&[typed.as_str(), fallback.as_str()], Subject::Value(prop))
            }
        }
    }

    /// Class list for an icon in the configured library
    pub fn icon_class(&self, icon: &str) -> String {
        self.settings.build_icon_class(icon)
    }

    /// Class list for a named icon, empty when unknown
    pub fn named_icon_class(&self, name: &str) -> String {
        self.settings.build_named_icon_class(name)
    }

    fn render(&self, names: &[&str], subject: Subject<'_>) -> Result<String, RenderError> {
        let (template_name, template) = self.registry.select(names)?;
        trace!(template = template_name, subject = subject.describe(), "rendering");
        let ctx = RenderContext {
            renderer: self,
            subject,
            template: template_name,
        };
        template.render(&ctx)
    }
}
