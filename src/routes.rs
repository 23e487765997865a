//! Named routes and URL reversing
//!
//! Properties with a `link` ask a [`RouteResolver`] to turn a route name and
//! parameters into a path. [`Router`] is a small in-memory implementation
//! over patterns such as `/reports/<int:pk>/`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use thiserror::Error;

/// Bytes quoted in parameter values. Unreserved characters, RFC 3986
/// sub-delimiters and `/:@~` pass through; `/` only reaches here via `<path:..>`.
const PARAM_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Errors from building routes or reversing them
#[derive(Debug, Error)]
pub enum RouteError {
    /// No route registered under this name
    #[error("unknown route: {name}")]
    UnknownRoute { name: String },

    /// The parameters do not fit the route's pattern
    #[error("no reverse match for route '{name}': {reason}")]
    NoReverseMatch { name: String, reason: String },

    /// A pattern that cannot be parsed
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Route registered twice
    #[error("duplicate route: {name}")]
    Duplicate { name: String },

    #[error("Failed to read routes file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse routes TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Turns a route name and parameters into a path
pub trait RouteResolver: Send + Sync {
    /// Reverse `name` with positional `args` or keyword `kwargs` (not both)
    fn reverse(
        &self,
        name: &str,
        args: &[String],
        kwargs: &BTreeMap<String, String>,
    ) -> Result<String, RouteError>;
}

/// Accepted shape of a route parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Any non-empty text without `/`
    Str,
    /// ASCII digits
    Int,
    /// ASCII letters, digits, hyphens and underscores
    Slug,
    /// Any non-empty text
    Path,
}

impl Converter {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "str" => Some(Converter::Str),
            "int" => Some(Converter::Int),
            "slug" => Some(Converter::Slug),
            "path" => Some(Converter::Path),
            _ => None,
        }
    }

    fn accepts(self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        match self {
            Converter::Str => !value.contains('/'),
            Converter::Int => value.chars().all(|c| c.is_ascii_digit()),
            Converter::Slug => value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            Converter::Path => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Param { name: String, converter: Converter },
}

/// A parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    parts: Vec<Part>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = Vec::new();
        let mut rest = pattern;
        while let Some(start) = rest.find('<') {
            if start > 0 {
                parts.push(Part::Literal(rest[..start].to_string()));
            }
            let end = rest[start..]
                .find('>')
                .map(|i| start + i)
                .ok_or_else(|| invalid("unclosed '<'"))?;
            let spec = &rest[start + 1..end];
            let (converter, name) = match spec.split_once(':') {
                Some((conv, name)) => (
                    Converter::parse(conv)
                        .ok_or_else(|| invalid(&format!("unknown converter '{}'", conv)))?,
                    name,
                ),
                None => (Converter::Str, spec),
            };
            if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(invalid(&format!("invalid parameter name '{}'", name)));
            }
            let duplicate = parts
                .iter()
                .any(|p| matches!(p, Part::Param { name: n, .. } if n == name));
            if duplicate {
                return Err(invalid(&format!("duplicate parameter '{}'", name)));
            }
            parts.push(Part::Param {
                name: name.to_string(),
                converter,
            });
            rest = &rest[end + 1..];
        }
        if rest.contains('>') {
            return Err(invalid("unmatched '>'"));
        }
        if !rest.is_empty() {
            parts.push(Part::Literal(rest.to_string()));
        }
        Ok(Self {
            raw: pattern.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameter names in pattern order
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|p| match p {
            Part::Param { name, .. } => Some(name.as_str()),
            Part::Literal(_) => None,
        })
    }

    fn build<'a>(
        &self,
        route: &str,
        mut lookup: impl FnMut(usize, &str) -> Option<&'a str>,
    ) -> Result<String, RouteError> {
        let mut url = String::new();
        let mut index = 0;
        for part in &self.parts {
            match part {
                Part::Literal(s) => url.push_str(s),
                Part::Param { name, converter } => {
                    let value = lookup(index, name).ok_or_else(|| RouteError::NoReverseMatch {
                        name: route.to_string(),
                        reason: format!("missing parameter '{}'", name),
                    })?;
                    if !converter.accepts(value) {
                        return Err(RouteError::NoReverseMatch {
                            name: route.to_string(),
                            reason: format!("'{}' is not a valid value for '{}'", value, name),
                        });
                    }
                    url.extend(utf8_percent_encode(value, PARAM_ENCODE_SET));
                    index += 1;
                }
            }
        }
        Ok(url)
    }
}

/// In-memory route table
#[derive(Debug, Default)]
pub struct Router {
    routes: HashMap<String, RoutePattern>,
}

/// TOML structure for deserializing routes
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlRoutes {
    #[serde(default)]
    routes: BTreeMap<String, String>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load routes from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, RouteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load routes from a TOML string
    ///
    /// ```toml
    /// [routes]
    /// report-detail = "/reports/<int:pk>/"
    /// ```
    pub fn from_str(content: &str) -> Result<Self, RouteError> {
        let parsed: TomlRoutes = toml::from_str(content)?;
        let mut router = Self::new();
        for (name, pattern) in parsed.routes {
            router.add(name, &pattern)?;
        }
        Ok(router)
    }

    /// Register a named pattern
    pub fn add(&mut self, name: impl Into<String>, pattern: &str) -> Result<(), RouteError> {
        let name = name.into();
        if self.routes.contains_key(&name) {
            return Err(RouteError::Duplicate { name });
        }
        let pattern = RoutePattern::parse(pattern)?;
        self.routes.insert(name, pattern);
        Ok(())
    }

    /// Register a named pattern (builder style)
    pub fn route(mut self, name: impl Into<String>, pattern: &str) -> Result<Self, RouteError> {
        self.add(name, pattern)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&RoutePattern> {
        self.routes.get(name)
    }
}

impl RouteResolver for Router {
    fn reverse(
        &self,
        name: &str,
        args: &[String],
        kwargs: &BTreeMap<String, String>,
    ) -> Result<String, RouteError> {
        let pattern = self.routes.get(name).ok_or_else(|| RouteError::UnknownRoute {
            name: name.to_string(),
        })?;
        let no_match = |reason: String| RouteError::NoReverseMatch {
            name: name.to_string(),
            reason,
        };

        if !args.is_empty() && !kwargs.is_empty() {
            return Err(no_match("cannot mix positional and keyword parameters".into()));
        }

        let expected = pattern.params().count();
        if kwargs.is_empty() {
            if args.len() != expected {
                return Err(no_match(format!(
                    "expected {} parameters, got {}",
                    expected,
                    args.len()
                )));
            }
            pattern.build(name, |i, _| args.get(i).map(String::as_str))
        } else {
            if let Some(extra) = kwargs.keys().find(|k| !pattern.params().any(|p| p == k.as_str())) {
                return Err(no_match(format!("unexpected parameter '{}'", extra)));
            }
            pattern.build(name, |_, param| kwargs.get(param).map(String::as_str))
        }
    }
}
