//! Schema metadata for models
//!
//! The resolver looks fields up by name through a [`SchemaProvider`]. Each
//! [`FieldDescriptor`] carries a closed [`FieldKind`] that is classified into a
//! coarse [`TypeTag`] used to pick value templates, and that decides whether
//! schema traversal continues into a related model.

mod registry;

pub use registry::{ModelSchema, SchemaError, SchemaRegistry};

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::text::DisplayText;

/// Field lookup by model and name
pub trait SchemaProvider: Send + Sync {
    fn field(&self, model: &str, name: &str) -> Option<&FieldDescriptor>;
}

/// Concrete kind of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Char,
    Slug,
    Url,
    Email,
    Text,
    Boolean,
    NullBoolean,
    #[serde(rename = "datetime")]
    DateTime,
    Date,
    Integer,
    SmallInteger,
    BigInteger,
    PositiveInteger,
    PositiveSmallInteger,
    PositiveBigInteger,
    Auto,
    BigAuto,
    SmallAuto,
    Float,
    Decimal,
    ForeignKey,
    OneToOne,
    /// Reverse side of a one-to-one relation
    OneToOneRel,
    ManyToMany,
    /// Reverse side of a many-to-many relation
    ManyToManyRel,
    /// Reverse side of a foreign key
    ManyToOneRel,
    #[serde(other)]
    Other,
}

impl FieldKind {
    /// Classify into a type tag. Derived kinds map to their most specific tag
    /// (a slug is `char`, not `text`).
    pub fn type_tag(self) -> TypeTag {
        use FieldKind::*;
        match self {
            Char | Slug | Url | Email => TypeTag::Char,
            Text => TypeTag::Text,
            Boolean | NullBoolean => TypeTag::Boolean,
            DateTime => TypeTag::DateTime,
            Date => TypeTag::Date,
            Integer | SmallInteger | BigInteger | PositiveInteger | PositiveSmallInteger
            | PositiveBigInteger | Auto | BigAuto | SmallAuto => TypeTag::Integer,
            Float | Decimal => TypeTag::Float,
            ForeignKey | OneToOne | OneToOneRel => TypeTag::ForeignKey,
            ManyToMany | ManyToManyRel | ManyToOneRel => TypeTag::ManyToMany,
            Other => TypeTag::Default,
        }
    }

    pub fn is_relation(self) -> bool {
        self.is_to_one() || self.is_to_many()
    }

    pub fn is_to_one(self) -> bool {
        matches!(
            self,
            FieldKind::ForeignKey | FieldKind::OneToOne | FieldKind::OneToOneRel
        )
    }

    pub fn is_to_many(self) -> bool {
        matches!(
            self,
            FieldKind::ManyToMany | FieldKind::ManyToManyRel | FieldKind::ManyToOneRel
        )
    }
}

/// Coarse semantic type used to select value templates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeTag {
    Char,
    Text,
    Boolean,
    DateTime,
    Date,
    Integer,
    Float,
    ForeignKey,
    ManyToMany,
    #[default]
    Default,
    /// A tag set explicitly in configuration (e.g. `timestamp`)
    Custom(String),
}

impl TypeTag {
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Char => "char",
            TypeTag::Text => "text",
            TypeTag::Boolean => "boolean",
            TypeTag::DateTime => "datetime",
            TypeTag::Date => "date",
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::ForeignKey => "foreignkey",
            TypeTag::ManyToMany => "manytomany",
            TypeTag::Default => "default",
            TypeTag::Custom(s) => s,
        }
    }
}

impl From<&str> for TypeTag {
    fn from(s: &str) -> Self {
        match s {
            "char" => TypeTag::Char,
            "text" => TypeTag::Text,
            "boolean" => TypeTag::Boolean,
            "datetime" => TypeTag::DateTime,
            "date" => TypeTag::Date,
            "integer" => TypeTag::Integer,
            "float" => TypeTag::Float,
            "foreignkey" => TypeTag::ForeignKey,
            "manytomany" => TypeTag::ManyToMany,
            "default" => TypeTag::Default,
            other => TypeTag::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How a field continues (or ends) schema traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation<'a> {
    Scalar,
    ToOne(&'a str),
    ToMany(&'a str),
}

/// Metadata for one field of a model
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub verbose_name: Option<DisplayText>,
    pub help_text: Option<DisplayText>,
    /// Target model of a relation field
    pub related_model: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            verbose_name: None,
            help_text: None,
            related_model: None,
        }
    }

    pub fn with_verbose_name(mut self, verbose_name: impl Into<DisplayText>) -> Self {
        self.verbose_name = Some(verbose_name.into());
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<DisplayText>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn related_to(mut self, model: impl Into<String>) -> Self {
        self.related_model = Some(model.into());
        self
    }

    /// Label for this field: the verbose name, else the humanized segment
    pub fn label(&self, segment: &str) -> DisplayText {
        match &self.verbose_name {
            Some(v) if !v.is_blank() => v.clone(),
            _ => DisplayText::Plain(humanize(segment)),
        }
    }

    /// Help text, ignoring empty strings
    pub fn help(&self) -> Option<&DisplayText> {
        self.help_text.as_ref().filter(|h| !h.is_blank())
    }

    pub fn type_tag(&self) -> TypeTag {
        self.kind.type_tag()
    }

    pub fn relation(&self) -> Relation<'_> {
        match self.related_model.as_deref() {
            Some(target) if self.kind.is_to_one() => Relation::ToOne(target),
            Some(target) if self.kind.is_to_many() => Relation::ToMany(target),
            _ => Relation::Scalar,
        }
    }
}

/// Turn a segment name into a label: underscores become spaces, and every
/// letter is uppercased when it starts a run of letters and lowercased
/// otherwise (`address2line` is `Address2Line`)
pub fn humanize(segment: &str) -> String {
    let mut label = String::with_capacity(segment.len());
    let mut after_letter = false;
    for c in segment.chars() {
        if c.is_alphabetic() {
            if after_letter {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            label.push(if c == '_' { ' ' } else { c });
            after_letter = false;
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        assert_eq!(FieldKind::Char.type_tag(), TypeTag::Char);
        assert_eq!(FieldKind::Slug.type_tag(), TypeTag::Char);
        assert_eq!(FieldKind::Email.type_tag(), TypeTag::Char);
        assert_eq!(FieldKind::Text.type_tag(), TypeTag::Text);
        assert_eq!(FieldKind::NullBoolean.type_tag(), TypeTag::Boolean);
        assert_eq!(FieldKind::DateTime.type_tag(), TypeTag::DateTime);
        assert_eq!(FieldKind::Date.type_tag(), TypeTag::Date);
        assert_eq!(FieldKind::BigAuto.type_tag(), TypeTag::Integer);
        assert_eq!(FieldKind::Decimal.type_tag(), TypeTag::Float);
        assert_eq!(FieldKind::OneToOne.type_tag(), TypeTag::ForeignKey);
        assert_eq!(FieldKind::OneToOneRel.type_tag(), TypeTag::ForeignKey);
        assert_eq!(FieldKind::ManyToOneRel.type_tag(), TypeTag::ManyToMany);
        assert_eq!(FieldKind::Other.type_tag(), TypeTag::Default);
    }

    #[test]
    fn test_type_tag_round_trip_names() {
        assert_eq!(TypeTag::from("datetime"), TypeTag::DateTime);
        assert_eq!(TypeTag::from("timestamp"), TypeTag::Custom("timestamp".to_string()));
        assert_eq!(TypeTag::Custom("timestamp".to_string()).as_str(), "timestamp");
        assert_eq!(TypeTag::ManyToMany.to_string(), "manytomany");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("title"), "Title");
        assert_eq!(humanize("is_public"), "Is Public");
        assert_eq!(humanize("get_full_name"), "Get Full Name");
        assert_eq!(humanize("_private"), " Private");
    }

    #[test]
    fn test_humanize_capitalizes_after_non_letters() {
        assert_eq!(humanize("address2line"), "Address2Line");
        assert_eq!(humanize("x_rayID"), "X Rayid");
        assert_eq!(humanize("ÉTAT_civil"), "État Civil");
    }

    #[test]
    fn test_label_prefers_verbose_name() {
        let field = FieldDescriptor::new("create_dt", FieldKind::DateTime)
            .with_verbose_name("Created at");
        assert_eq!(field.label("create_dt"), DisplayText::from("Created at"));

        let plain = FieldDescriptor::new("create_dt", FieldKind::DateTime);
        assert_eq!(plain.label("create_dt"), DisplayText::from("Create Dt"));
    }

    #[test]
    fn test_relation_capability() {
        let fk = FieldDescriptor::new("owner", FieldKind::ForeignKey).related_to("User");
        assert_eq!(fk.relation(), Relation::ToOne("User"));

        let m2m = FieldDescriptor::new("tags", FieldKind::ManyToMany).related_to("Tag");
        assert_eq!(m2m.relation(), Relation::ToMany("Tag"));

        let scalar = FieldDescriptor::new("title", FieldKind::Char);
        assert_eq!(scalar.relation(), Relation::Scalar);
    }

    #[test]
    fn test_empty_help_text_ignored() {
        let field = FieldDescriptor::new("title", FieldKind::Char).with_help_text("");
        assert!(field.help().is_none());
    }

    #[test]
    fn test_field_kind_deserialize() {
        #[derive(Deserialize)]
        struct Holder {
            kind: FieldKind,
        }
        let h: Holder = toml::from_str(r#"kind = "datetime""#).unwrap();
        assert_eq!(h.kind, FieldKind::DateTime);
        let h: Holder = toml::from_str(r#"kind = "many_to_many""#).unwrap();
        assert_eq!(h.kind, FieldKind::ManyToMany);
        let h: Holder = toml::from_str(r#"kind = "json""#).unwrap();
        assert_eq!(h.kind, FieldKind::Other);
    }
}
