//! In-memory schema registry, buildable in code or loaded from TOML

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::{FieldDescriptor, FieldKind, SchemaProvider};
use crate::text::DisplayText;

/// Errors that can occur when building or loading a schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Model registered twice
    #[error("duplicate model definition: {name}")]
    DuplicateModel { name: String },

    /// Field defined twice on one model
    #[error("duplicate field '{field}' on model {model}")]
    DuplicateField { model: String, field: String },

    /// Relation field without a target model
    #[error("relation field '{field}' on model {model} has no related_model")]
    MissingTarget { model: String, field: String },

    /// Relation field pointing at a model that is not registered
    #[error("field '{field}' on model {model} refers to unknown model {target}")]
    UnknownTarget {
        model: String,
        field: String,
        target: String,
    },

    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse schema TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Fields of one model, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSchema {
    pub name: String,
    fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field (builder style)
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// Registry of model schemas
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    models: HashMap<String, ModelSchema>,
}

/// TOML structure for deserializing schemas
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSchema {
    #[serde(default)]
    models: Vec<TomlModel>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlModel {
    name: String,
    #[serde(default)]
    fields: Vec<TomlField>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlField {
    name: String,
    kind: FieldKind,
    verbose_name: Option<String>,
    help_text: Option<String>,
    related_model: Option<String>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a schema from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a schema from a TOML string
    ///
    /// ```toml
    /// [[models]]
    /// name = "Report"
    ///
    /// [[models.fields]]
    /// name = "owner"
    /// kind = "foreign_key"
    /// related_model = "User"
    /// ```
    pub fn from_str(content: &str) -> Result<Self, SchemaError> {
        let parsed: TomlSchema = toml::from_str(content)?;

        let mut registry = Self::new();
        for model in parsed.models {
            let mut schema = ModelSchema::new(&model.name);
            for f in model.fields {
                let mut field = FieldDescriptor::new(f.name, f.kind);
                field.verbose_name = f.verbose_name.map(DisplayText::from);
                field.help_text = f.help_text.map(DisplayText::from);
                field.related_model = f.related_model;
                schema = schema.with_field(field);
            }
            registry.register(schema)?;
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Register a model schema
    pub fn register(&mut self, schema: ModelSchema) -> Result<(), SchemaError> {
        if self.models.contains_key(&schema.name) {
            return Err(SchemaError::DuplicateModel { name: schema.name });
        }
        for (i, field) in schema.fields.iter().enumerate() {
            if schema.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    model: schema.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        self.models.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Check that every relation names a registered target model
    pub fn validate(&self) -> Result<(), SchemaError> {
        for model in self.models.values() {
            for field in &model.fields {
                if !field.kind.is_relation() {
                    continue;
                }
                let target = field
                    .related_model
                    .as_ref()
                    .ok_or_else(|| SchemaError::MissingTarget {
                        model: model.name.clone(),
                        field: field.name.clone(),
                    })?;
                if !self.models.contains_key(target) {
                    return Err(SchemaError::UnknownTarget {
                        model: model.name.clone(),
                        field: field.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn model(&self, name: &str) -> Option<&ModelSchema> {
        self.models.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Get all model names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(|s| s.as_str())
    }
}

impl SchemaProvider for SchemaRegistry {
    fn field(&self, model: &str, name: &str) -> Option<&FieldDescriptor> {
        self.models.get(model)?.field(name)
    }
}
