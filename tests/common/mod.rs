//! Shared schema and instances for integration tests

#![allow(dead_code)]

use object_detail::instance::{load_fixture, ObjectRef, Record, Value};
use object_detail::schema::SchemaRegistry;
use serde_json::json;

pub const SCHEMA: &str = r#"
[[models]]
name = "User"

[[models.fields]]
name = "username"
kind = "char"
help_text = "Login name"

[[models.fields]]
name = "profile"
kind = "one_to_one"
related_model = "Profile"

[[models]]
name = "Profile"

[[models.fields]]
name = "bio"
kind = "text"

[[models]]
name = "Tag"

[[models.fields]]
name = "name"
kind = "slug"

[[models]]
name = "Report"

[[models.fields]]
name = "title"
kind = "char"
verbose_name = "Report title"

[[models.fields]]
name = "rating"
kind = "float"

[[models.fields]]
name = "published"
kind = "date"

[[models.fields]]
name = "owner"
kind = "foreign_key"
related_model = "User"
help_text = "Person responsible"

[[models.fields]]
name = "tags"
kind = "many_to_many"
related_model = "Tag"

[[models.fields]]
name = "reviewers"
kind = "many_to_many"
related_model = "User"
"#;

pub fn schema() -> SchemaRegistry {
    SchemaRegistry::from_str(SCHEMA).expect("test schema should load")
}

/// A report owned by alice, tagged `a` and `b`, reviewed by bob and carol
pub fn report() -> ObjectRef {
    report_from(json!({
        "pk": 7,
        "__str__": "Quarterly",
        "title": "X",
        "rating": 4.2,
        "published": "2024-03-01",
        "owner": {
            "pk": 1,
            "__str__": "alice",
            "username": "alice",
            "profile": {"pk": 11, "bio": "Writes reports"}
        },
        "tags": [
            {"pk": 1, "__str__": "a", "name": "a"},
            {"pk": 2, "__str__": "b", "name": "b"}
        ],
        "reviewers": [
            {"pk": 2, "username": "bob", "profile": null},
            {"pk": 3, "username": "carol", "profile": {"pk": 13, "bio": "Reviews"}}
        ]
    }))
}

/// A report with no owner and no related rows
pub fn orphan_report() -> ObjectRef {
    report_from(json!({
        "pk": 8,
        "title": "Orphan",
        "rating": null,
        "owner": null,
        "tags": [],
        "reviewers": []
    }))
}

pub fn report_from(fixture: serde_json::Value) -> ObjectRef {
    load_fixture(&schema(), "Report", &fixture).expect("test fixture should load")
}

/// A report built in code, with a method returning the tag count
pub fn report_with_method() -> ObjectRef {
    let report: ObjectRef = Record::builder("Report")
        .pk(9)
        .field("title", "Built")
        .related("tags", vec!["x", "y", "z"])
        .method("tag_count", |r| match r.field("title") {
            Some(_) => Value::Int(3),
            None => Value::Null,
        })
        .build();
    report
}
