//! Display text that may be evaluated lazily
//!
//! Labels, details and group titles can be plain strings or deferred,
//! locale-sensitive strings. Deferred strings are carried through configuration
//! and resolution untouched and only evaluated when rendered.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A string evaluated on demand for a given locale
pub trait DeferredText: Send + Sync {
    /// Produce the text for `locale` (`None` means the source language)
    fn resolve(&self, locale: Option<&str>) -> String;
}

impl<F> DeferredText for F
where
    F: Fn(Option<&str>) -> String + Send + Sync,
{
    fn resolve(&self, locale: Option<&str>) -> String {
        self(locale)
    }
}

/// Text shown to a user: immediate or deferred
#[derive(Clone)]
pub enum DisplayText {
    Plain(String),
    Deferred(Arc<dyn DeferredText>),
}

impl DisplayText {
    /// Wrap a closure as deferred text
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn(Option<&str>) -> String + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(f))
    }

    /// Evaluate the text for a locale
    pub fn resolve(&self, locale: Option<&str>) -> String {
        match self {
            Self::Plain(s) => s.clone(),
            Self::Deferred(d) => d.resolve(locale),
        }
    }

    /// True only for an empty plain string. Deferred text is never evaluated here.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Plain(s) if s.is_empty())
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// The plain string, if this text is not deferred
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            Self::Plain(s) => Some(s),
            Self::Deferred(_) => None,
        }
    }
}

impl PartialEq for DisplayText {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Plain(a), Self::Plain(b)) => a == b,
            (Self::Deferred(a), Self::Deferred(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(s) => write!(f, "{:?}", s),
            Self::Deferred(_) => write!(f, "DisplayText::Deferred(..)"),
        }
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve(None))
    }
}

impl Serialize for DisplayText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.resolve(None))
    }
}

impl From<&str> for DisplayText {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_string())
    }
}

impl From<String> for DisplayText {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

impl From<&String> for DisplayText {
    fn from(s: &String) -> Self {
        Self::Plain(s.clone())
    }
}

/// Errors that can occur when loading a message catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Translations keyed by locale, then by source message
///
/// ```toml
/// [de]
/// "Report title" = "Berichtstitel"
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a catalog from a TOML string
    pub fn from_str(content: &str) -> Result<Self, CatalogError> {
        let messages: HashMap<String, HashMap<String, String>> = toml::from_str(content)?;
        Ok(Self { messages })
    }

    /// Add a single translation
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        msgid: impl Into<String>,
        msgstr: impl Into<String>,
    ) {
        self.messages
            .entry(locale.into())
            .or_default()
            .insert(msgid.into(), msgstr.into());
    }

    /// Translate `msgid`, falling back to the message itself
    pub fn translate(&self, locale: Option<&str>, msgid: &str) -> String {
        locale
            .and_then(|l| self.messages.get(l))
            .and_then(|m| m.get(msgid))
            .cloned()
            .unwrap_or_else(|| msgid.to_string())
    }

    /// Deferred text that is translated through this catalog when rendered
    pub fn lazy(self: &Arc<Self>, msgid: impl Into<String>) -> DisplayText {
        DisplayText::Deferred(Arc::new(Translated {
            msgid: msgid.into(),
            catalog: Arc::clone(self),
        }))
    }
}

/// A message looked up in a catalog at render time
struct Translated {
    msgid: String,
    catalog: Arc<Catalog>,
}

impl DeferredText for Translated {
    fn resolve(&self, locale: Option<&str>) -> String {
        self.catalog.translate(locale, &self.msgid)
    }
}
