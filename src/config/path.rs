//! Property paths

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Separator between path segments (`owner__username`)
pub const SEGMENT_DELIMITER: &str = "__";

/// A parsed, non-empty attribute path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    raw: String,
    segments: Vec<String>,
}

impl PropertyPath {
    /// Parse a path, rejecting empty paths and empty segments
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        if raw.is_empty() {
            return Err(ConfigurationError::EmptyPath);
        }
        let segments: Vec<String> = raw.split(SEGMENT_DELIMITER).map(str::to_string).collect();
        if let Some(position) = segments.iter().position(|s| s.is_empty()) {
            return Err(ConfigurationError::EmptySegment {
                path: raw.to_string(),
                position,
            });
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment of the path
    pub fn last(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl FromStr for PropertyPath {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
