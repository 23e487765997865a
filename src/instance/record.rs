//! Dynamic model instances

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{Attribute, Collection, Object, Value};

/// A method on a record: called with the record, takes no other arguments
pub type Method = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Related items of a to-many relation on a record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedSet(pub Vec<Value>);

impl Collection for RelatedSet {
    fn all(&self) -> Vec<Value> {
        self.0.clone()
    }
}

/// A model instance with dynamically named fields, relations and methods
pub struct Record {
    model: String,
    pk: Value,
    fields: BTreeMap<String, Value>,
    related: BTreeMap<String, RelatedSet>,
    methods: BTreeMap<String, Method>,
    display: Option<Method>,
}

impl Record {
    /// Start building a record of the given model
    pub fn builder(model: impl Into<String>) -> RecordBuilder {
        RecordBuilder::new(model)
    }

    pub fn pk(&self) -> &Value {
        &self.pk
    }

    /// A stored field value (not relations or methods)
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Convenience for methods: a stored field rendered as a string
    pub fn field_str(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}

impl Object for Record {
    fn model(&self) -> &str {
        &self.model
    }

    fn attr(&self, name: &str) -> Option<Attribute<'_>> {
        if let Some(value) = self.fields.get(name) {
            return Some(Attribute::Value(value.clone()));
        }
        if let Some(set) = self.related.get(name) {
            return Some(Attribute::Collection(set));
        }
        if let Some(method) = self.methods.get(name) {
            let method = Arc::clone(method);
            return Some(Attribute::Callable(Box::new(move || method(self))));
        }
        if name == "pk" || name == "id" {
            return Some(Attribute::Value(self.pk.clone()));
        }
        None
    }

    fn display(&self) -> String {
        match &self.display {
            Some(f) => f(self).to_string(),
            None => format!("{} object ({})", self.model, self.pk),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("model", &self.model)
            .field("pk", &self.pk)
            .field("fields", &self.fields)
            .field("related", &self.related.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Record`]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            record: Record {
                model: model.into(),
                pk: Value::Null,
                fields: BTreeMap::new(),
                related: BTreeMap::new(),
                methods: BTreeMap::new(),
                display: None,
            },
        }
    }

    /// Set the primary key (also readable as the `pk` and `id` attributes)
    pub fn pk(mut self, pk: impl Into<Value>) -> Self {
        self.record.pk = pk.into();
        self
    }

    /// Set a plain field or a to-one relation
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.fields.insert(name.into(), value.into());
        self
    }

    /// Set a to-many relation
    pub fn related<I, V>(mut self, name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.record.related.insert(name.into(), RelatedSet(items));
        self
    }

    /// Add a zero-argument method
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        self.record.methods.insert(name.into(), Arc::new(f));
        self
    }

    /// Use a field as the record's display string
    pub fn display_field(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.display_with(move |r| Value::Str(r.field_str(&name)))
    }

    /// Compute the record's display string
    pub fn display_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        self.record.display = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Arc<Record> {
        Arc::new(self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_attr() {
        let rec = Record::builder("Report").pk(1).field("title", "X").build();
        match rec.attr("title") {
            Some(Attribute::Value(v)) => assert_eq!(v, Value::from("X")),
            other => panic!("unexpected attribute: {:?}", other),
        }
        assert!(rec.attr("missing").is_none());
    }

    #[test]
    fn test_pk_and_id_attrs() {
        let rec = Record::builder("Report").pk(5).build();
        assert!(matches!(rec.attr("pk"), Some(Attribute::Value(Value::Int(5)))));
        assert!(matches!(rec.attr("id"), Some(Attribute::Value(Value::Int(5)))));
    }

    #[test]
    fn test_related_attr_is_collection() {
        let rec = Record::builder("Report")
            .related("tags", vec!["a", "b"])
            .build();
        match rec.attr("tags") {
            Some(Attribute::Collection(c)) => {
                assert_eq!(c.all(), vec![Value::from("a"), Value::from("b")])
            }
            other => panic!("unexpected attribute: {:?}", other),
        };
    }

    #[test]
    fn test_method_attr_is_callable() {
        let rec = Record::builder("Report")
            .field("title", "Test Report")
            .method("title_upper", |r| Value::from(r.field_str("title").to_uppercase()))
            .build();
        match rec.attr("title_upper") {
            Some(Attribute::Callable(f)) => assert_eq!(f(), Value::from("TEST REPORT")),
            other => panic!("unexpected attribute: {:?}", other),
        };
    }

    #[test]
    fn test_display() {
        let plain = Record::builder("Report").pk(3).build();
        assert_eq!(plain.display(), "Report object (3)");

        let named = Record::builder("User")
            .field("username", "testuser")
            .display_field("username")
            .build();
        assert_eq!(named.display(), "testuser");
    }
}
