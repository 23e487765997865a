//! Resolved output records

use serde::Serialize;

use crate::instance::Value;
use crate::schema::TypeTag;
use crate::text::DisplayText;

/// One property, resolved against an instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedProperty {
    pub path: String,
    pub label: DisplayText,
    pub value: Value,
    pub detail: Option<DisplayText>,
    #[serde(rename = "type")]
    pub kind: TypeTag,
    /// Explicit value template, bypassing type-based selection
    pub template: Option<String>,
    pub is_many: bool,
    pub link_url: Option<String>,
    pub badge_css: Option<String>,
    pub badge_label: Option<String>,
}

impl ResolvedProperty {
    /// A single-valued property of type `default` with no extras
    pub fn new(path: impl Into<String>, label: impl Into<DisplayText>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            value: value.into(),
            detail: None,
            kind: TypeTag::Default,
            template: None,
            is_many: false,
            link_url: None,
            badge_css: None,
            badge_label: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<TypeTag>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<DisplayText>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_link_url(mut self, url: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self
    }

    pub fn with_badge(mut self, css: impl Into<String>, label: Option<String>) -> Self {
        self.badge_css = Some(css.into());
        self.badge_label = label;
        self
    }

    /// Mark as many-valued; a null value becomes an empty list
    pub fn many(mut self) -> Self {
        self.is_many = true;
        self.value = match std::mem::replace(&mut self.value, Value::Null) {
            Value::List(items) => Value::List(items),
            Value::Null => Value::List(Vec::new()),
            single => Value::List(vec![single]),
        };
        self
    }
}

/// A group of resolved properties with its display metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedGroup {
    pub title: DisplayText,
    pub description: Option<DisplayText>,
    pub icon: Option<String>,
    pub properties: Vec<ResolvedProperty>,
}

impl ResolvedGroup {
    pub fn new(title: impl Into<DisplayText>, properties: Vec<ResolvedProperty>) -> Self {
        Self {
            title: title.into(),
            description: None,
            icon: None,
            properties,
        }
    }

    pub fn with_description(mut self, description: impl Into<DisplayText>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
