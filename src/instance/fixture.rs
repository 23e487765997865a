//! Build record graphs from JSON fixtures
//!
//! A fixture is a JSON object whose keys are attribute names. The schema
//! decides how each key is read: to-one relations hold a nested object (or
//! null), to-many relations hold an array of nested objects, and date fields
//! hold ISO strings. Keys the schema does not know are kept as plain
//! attributes. `pk` sets the primary key and `__str__` the display string.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value as Json;
use thiserror::Error;
use tracing::debug;

use super::{ObjectRef, Record, Value};
use crate::schema::{FieldKind, Relation, SchemaProvider};

/// Errors that can occur when loading a fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("expected an object for model {model}, got {found}")]
    NotAnObject { model: String, found: String },

    #[error("expected a list for to-many field '{field}' on {model}")]
    NotAList { model: String, field: String },

    #[error("invalid {kind} value '{value}' for field '{field}' on {model}")]
    InvalidDate {
        model: String,
        field: String,
        kind: &'static str,
        value: String,
    },

    #[error("Failed to read fixture file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse fixture JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Load a JSON fixture as an instance of `model`
pub fn load_fixture(
    schema: &dyn SchemaProvider,
    model: &str,
    json: &Json,
) -> Result<ObjectRef, FixtureError> {
    let record: ObjectRef = load_record(schema, model, json)?;
    Ok(record)
}

fn load_record(
    schema: &dyn SchemaProvider,
    model: &str,
    json: &Json,
) -> Result<std::sync::Arc<Record>, FixtureError> {
    let map = json.as_object().ok_or_else(|| FixtureError::NotAnObject {
        model: model.to_string(),
        found: json.to_string(),
    })?;

    let mut builder = Record::builder(model);
    for (key, raw) in map {
        if key == "pk" {
            builder = builder.pk(scalar(raw));
            continue;
        }
        if key == "__str__" {
            let display = scalar(raw).to_string();
            builder = builder.display_with(move |_| Value::Str(display.clone()));
            continue;
        }

        let Some(field) = schema.field(model, key) else {
            debug!(model, attribute = %key, "fixture attribute not in schema");
            builder = builder.field(key.as_str(), scalar(raw));
            continue;
        };

        builder = match field.relation() {
            Relation::ToOne(target) => {
                if raw.is_null() {
                    builder.field(key.as_str(), Value::Null)
                } else {
                    builder.field(key.as_str(), load_record(schema, target, raw)?)
                }
            }
            Relation::ToMany(target) => {
                let items = raw.as_array().ok_or_else(|| FixtureError::NotAList {
                    model: model.to_string(),
                    field: key.clone(),
                })?;
                let related = items
                    .iter()
                    .map(|item| load_record(schema, target, item).map(Value::from))
                    .collect::<Result<Vec<_>, _>>()?;
                builder.related(key.as_str(), related)
            }
            Relation::Scalar => {
                builder.field(key.as_str(), typed_scalar(model, key, field.kind, raw)?)
            }
        };
    }
    Ok(builder.build())
}

/// Read a scalar field, parsing dates for date-typed fields
fn typed_scalar(
    model: &str,
    field: &str,
    kind: FieldKind,
    raw: &Json,
) -> Result<Value, FixtureError> {
    let invalid = |kind: &'static str, value: &str| FixtureError::InvalidDate {
        model: model.to_string(),
        field: field.to_string(),
        kind,
        value: value.to_string(),
    };

    match (kind, raw) {
        (FieldKind::Date, Json::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| invalid("date", s)),
        (FieldKind::DateTime, Json::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Value::DateTime(dt.with_timezone(&Utc)))
            .map_err(|_| invalid("datetime", s)),
        _ => Ok(scalar(raw)),
    }
}

/// Convert a JSON value without schema guidance
fn scalar(raw: &Json) -> Value {
    match raw {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::Str(s.clone()),
        Json::Array(items) => Value::List(items.iter().map(scalar).collect()),
        Json::Object(_) => Value::Str(raw.to_string()),
    }
}
