//! Schema pass: label, help text, type tag and cardinality for a path

use tracing::debug;

use crate::config::PropertyPath;
use crate::schema::{humanize, Relation, SchemaProvider, TypeTag};
use crate::text::DisplayText;

/// Metadata collected by walking a path over the schema
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Metadata {
    pub label: DisplayText,
    pub detail: Option<DisplayText>,
    pub kind: TypeTag,
    pub is_many: bool,
}

/// Walk `path` over the schema starting at `root_model`.
///
/// The label starts out as the raw path and is replaced at every known
/// field. Help text sticks once seen. An unknown segment (a method or
/// computed attribute) takes the humanized segment as its label and stops
/// the walk, keeping whatever type was classified before it.
pub(crate) fn collect(schema: &dyn SchemaProvider, root_model: &str, path: &PropertyPath) -> Metadata {
    let mut meta = Metadata {
        label: DisplayText::from(path.as_str()),
        detail: None,
        kind: TypeTag::Default,
        is_many: false,
    };

    let segments = path.segments();
    let mut model = root_model;
    for (i, segment) in segments.iter().enumerate() {
        let Some(field) = schema.field(model, segment) else {
            debug!(model, segment = %segment, "segment is not a schema field");
            meta.label = DisplayText::Plain(humanize(segment));
            break;
        };

        meta.label = field.label(segment);
        if let Some(help) = field.help() {
            meta.detail = Some(help.clone());
        }
        meta.kind = field.type_tag();

        match field.relation() {
            Relation::ToOne(target) => model = target,
            Relation::ToMany(target) => {
                meta.is_many = true;
                model = target;
            }
            Relation::Scalar => {
                if i + 1 < segments.len() {
                    debug!(model, segment = %segment, "path continues past a scalar field");
                    meta.label = DisplayText::Plain(humanize(path.last()));
                }
                break;
            }
        }
    }
    meta
}
