//! Link and badge options for a property

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::instance::Value;

/// Build a URL for the resolved value from a named route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Route name
    pub url: String,
    /// Attribute names read off the value, passed positionally
    pub args: Option<Vec<String>>,
    /// Route parameter name -> attribute name read off the value
    pub kwargs: Option<BTreeMap<String, String>>,
}

impl LinkConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            args: None,
            kwargs: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_kwargs<I, K, V>(mut self, kwargs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.kwargs = Some(
            kwargs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }
}

impl From<&str> for LinkConfig {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for LinkConfig {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

/// Computes a badge color from the resolved value
pub type ColorFn = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Render the value as a colored badge
///
/// Map keys are value keys (see [`Value::key`]): `"true"`, `"4"`, the string
/// itself, or an object's primary key.
#[derive(Clone, Default)]
pub struct BadgeConfig {
    pub color: Option<String>,
    pub color_map: Option<BTreeMap<String, String>>,
    pub color_fn: Option<ColorFn>,
    pub label_map: Option<BTreeMap<String, String>>,
    pub pill: bool,
}

impl BadgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_color_map<I, K, V>(mut self, map: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.color_map = Some(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    pub fn with_color_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.color_fn = Some(Arc::new(f));
        self
    }

    pub fn with_label_map<I, K, V>(mut self, map: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.label_map = Some(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    pub fn with_pill(mut self, pill: bool) -> Self {
        self.pill = pill;
        self
    }

    /// Badge color for a value: function, then map, then fixed color, then `secondary`
    pub fn color_for(&self, value: &Value) -> String {
        if let Some(color) = self.color_fn.as_ref().and_then(|f| f(value)) {
            return color;
        }
        let key = value.key();
        if let Some(color) = self
            .color_map
            .as_ref()
            .zip(key.as_ref())
            .and_then(|(map, key)| map.get(key))
        {
            return color.clone();
        }
        self.color
            .clone()
            .unwrap_or_else(|| "secondary".to_string())
    }

    /// Replacement label for a value, if the label map has one
    pub fn label_for(&self, value: &Value) -> Option<String> {
        let key = value.key()?;
        self.label_map.as_ref()?.get(&key).cloned()
    }

    /// CSS classes for the badge element
    pub fn css_class(&self, value: &Value) -> String {
        let mut css = format!("badge text-bg-{}", self.color_for(value));
        if self.pill {
            css.push_str(" rounded-pill");
        }
        css
    }
}

impl PartialEq for BadgeConfig {
    fn eq(&self, other: &Self) -> bool {
        let same_fn = match (&self.color_fn, &other.color_fn) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        };
        same_fn
            && self.color == other.color
            && self.color_map == other.color_map
            && self.label_map == other.label_map
            && self.pill == other.pill
    }
}

impl fmt::Debug for BadgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadgeConfig")
            .field("color", &self.color)
            .field("color_map", &self.color_map)
            .field("color_fn", &self.color_fn.as_ref().map(|_| ".."))
            .field("label_map", &self.label_map)
            .field("pill", &self.pill)
            .finish()
    }
}

impl From<&str> for BadgeConfig {
    fn from(color: &str) -> Self {
        Self::new().with_color(color)
    }
}

impl From<String> for BadgeConfig {
    fn from(color: String) -> Self {
        Self::new().with_color(color)
    }
}
