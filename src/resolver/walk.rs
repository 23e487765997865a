//! Value pass: walk a path over the live instance graph

use tracing::debug;

use crate::config::PropertyPath;
use crate::instance::{Attribute, ObjectRef, Value};

/// Working set after the last segment
#[derive(Debug)]
pub(crate) struct Walk {
    pub values: Vec<Value>,
    /// A collection attribute was expanded at some segment
    pub fanned_out: bool,
}

/// Follow `path` from `instance`, fanning out over collections.
///
/// Null entries are carried forward unchanged. Missing attributes and
/// attribute access on non-objects read as null.
pub(crate) fn walk(instance: &ObjectRef, path: &PropertyPath) -> Walk {
    let mut current = vec![Value::Object(ObjectRef::clone(instance))];
    let mut fanned_out = false;

    for segment in path.segments() {
        let mut next = Vec::with_capacity(current.len());
        for value in &current {
            let obj = match value {
                Value::Null => {
                    next.push(Value::Null);
                    continue;
                }
                Value::Object(obj) => obj,
                other => {
                    debug!(segment = %segment, value = %other, "attribute access on a non-object");
                    next.push(Value::Null);
                    continue;
                }
            };
            match obj.attr(segment) {
                Some(Attribute::Collection(collection)) => {
                    fanned_out = true;
                    next.extend(collection.all());
                }
                Some(Attribute::Callable(call)) => next.push(call()),
                Some(Attribute::Value(v)) => next.push(v),
                None => {
                    debug!(model = obj.model(), segment = %segment, "missing attribute");
                    next.push(Value::Null);
                }
            }
        }
        current = next;
    }

    Walk {
        values: current,
        fanned_out,
    }
}

/// Collapse the working set into the property value
pub(crate) fn finalize(mut values: Vec<Value>, is_many: bool) -> Value {
    if is_many {
        return Value::List(values.into_iter().filter(|v| !v.is_null()).collect());
    }
    if values.len() == 1 {
        return values.pop().unwrap_or(Value::Null);
    }
    Value::List(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Record;

    fn report() -> ObjectRef {
        let alice = Record::builder("User")
            .pk(1)
            .field("username", "alice")
            .build();
        let tag = |pk: i64, name: &str| Value::from(Record::builder("Tag").pk(pk).field("name", name).build());
        let report: ObjectRef = Record::builder("Report")
            .pk(10)
            .field("title", "Quarterly")
            .field("owner", alice)
            .field("reviewer", Value::Null)
            .related("tags", vec![tag(1, "a"), tag(2, "b")])
            .method("title_upper", |r| Value::from(r.field_str("title").to_uppercase()))
            .build();
        report
    }

    fn run(path: &str) -> Walk {
        walk(&report(), &PropertyPath::parse(path).unwrap())
    }

    #[test]
    fn test_direct_value() {
        let w = run("title");
        assert_eq!(w.values, vec![Value::from("Quarterly")]);
        assert!(!w.fanned_out);
    }

    #[test]
    fn test_to_one_hop() {
        assert_eq!(run("owner__username").values, vec![Value::from("alice")]);
    }

    #[test]
    fn test_null_propagates() {
        let w = run("reviewer__username__length");
        assert_eq!(w.values, vec![Value::Null]);
    }

    #[test]
    fn test_fan_out() {
        let w = run("tags__name");
        assert!(w.fanned_out);
        assert_eq!(w.values, vec![Value::from("a"), Value::from("b")]);
    }

    #[test]
    fn test_callable_invoked() {
        assert_eq!(run("title_upper").values, vec![Value::from("QUARTERLY")]);
    }

    #[test]
    fn test_missing_attribute_is_null() {
        assert_eq!(run("nope").values, vec![Value::Null]);
        assert_eq!(run("title__nope").values, vec![Value::Null]);
    }

    #[test]
    fn test_finalize() {
        assert_eq!(finalize(vec![Value::from(1)], false), Value::from(1));
        assert_eq!(
            finalize(vec![Value::from(1), Value::Null], true),
            Value::List(vec![Value::from(1)])
        );
        assert_eq!(finalize(vec![], true), Value::List(vec![]));
        assert_eq!(finalize(vec![], false), Value::List(vec![]));
        assert_eq!(
            finalize(vec![Value::from(1), Value::from(2)], false),
            Value::List(vec![Value::from(1), Value::from(2)])
        );
    }
}
