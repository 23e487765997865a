//! Property resolution
//!
//! A property path is walked twice. The schema pass ([`metadata`]) recovers
//! the label, help text, type tag and whether the path crosses a to-many
//! relation. The value pass ([`walk`]) follows the same segments over the live
//! instance, fanning out over collections, invoking callables and carrying
//! nulls forward. Neither pass fails: missing data degrades to null output.
//!
//! # Example
//!
//! ```rust
//! use object_detail::config::PropertyConfig;
//! use object_detail::instance::{ObjectRef, Record, Value};
//! use object_detail::resolver::Resolver;
//! use object_detail::schema::{FieldDescriptor, FieldKind, ModelSchema, SchemaRegistry};
//!
//! let mut schema = SchemaRegistry::new();
//! schema
//!     .register(ModelSchema::new("Book").with_field(FieldDescriptor::new("title", FieldKind::Char)))
//!     .unwrap();
//!
//! let book: ObjectRef = Record::builder("Book").pk(1).field("title", "Dune").build();
//! let prop = Resolver::new(&schema).resolve_property(&book, &PropertyConfig::new("title").unwrap());
//! assert_eq!(prop.label.to_string(), "Title");
//! assert_eq!(prop.value, Value::from("Dune"));
//! ```

mod link;
mod metadata;
mod types;
mod walk;

pub use types::{ResolvedGroup, ResolvedProperty};

use tracing::trace;

use crate::config::{PropertyConfig, PropertyGroupConfig};
use crate::instance::ObjectRef;
use crate::routes::RouteResolver;
use crate::schema::{SchemaProvider, TypeTag};

/// Resolves configured properties against instances
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    schema: &'a dyn SchemaProvider,
    routes: Option<&'a dyn RouteResolver>,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a dyn SchemaProvider) -> Self {
        Self {
            schema,
            routes: None,
        }
    }

    /// Use `routes` to build link URLs
    pub fn with_routes(mut self, routes: &'a dyn RouteResolver) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Resolve one property against `instance`
    pub fn resolve_property(&self, instance: &ObjectRef, config: &PropertyConfig) -> ResolvedProperty {
        let path = config.path();
        let mut meta = metadata::collect(self.schema, instance.model(), path);

        if let Some(title) = config.title().filter(|t| !t.is_blank()) {
            meta.label = title.clone();
        }
        if let Some(detail) = config.detail() {
            meta.detail = Some(detail.clone());
        }
        if let Some(kind) = config.kind().filter(|k| !k.is_empty()) {
            meta.kind = TypeTag::from(kind);
        }

        let walked = walk::walk(instance, path);
        let is_many = meta.is_many || walked.fanned_out;
        let value = walk::finalize(walked.values, is_many);

        let single = !is_many && !value.is_null();
        let link_url = config
            .link()
            .filter(|_| single)
            .and_then(|l| link::link_url(self.routes, l, &value));
        let (badge_css, badge_label) = match config.badge().filter(|_| single) {
            Some(badge) => {
                let (css, label) = link::badge(badge, &value);
                (Some(css), label)
            }
            None => (None, None),
        };

        trace!(path = %path, kind = %meta.kind, is_many, "resolved property");

        ResolvedProperty {
            path: path.to_string(),
            label: meta.label,
            value,
            detail: meta.detail.filter(|d| !d.is_blank()),
            kind: meta.kind,
            template: config.template().map(str::to_string),
            is_many,
            link_url,
            badge_css,
            badge_label,
        }
    }

    /// Resolve every property of a group, in declared order
    pub fn resolve_group(&self, instance: &ObjectRef, config: &PropertyGroupConfig) -> ResolvedGroup {
        ResolvedGroup {
            title: config.title.clone(),
            description: config.description.clone(),
            icon: config.icon.clone(),
            properties: config
                .properties
                .iter()
                .map(|p| self.resolve_property(instance, p))
                .collect(),
        }
    }

    /// Resolve groups, preserving their order
    pub fn resolve_all(&self, instance: &ObjectRef, groups: &[PropertyGroupConfig]) -> Vec<ResolvedGroup> {
        groups
            .iter()
            .map(|g| self.resolve_group(instance, g))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{x, BadgeConfig, LinkConfig};
    use crate::instance::{Record, Value};
    use crate::routes::Router;
    use crate::schema::{FieldDescriptor, FieldKind, ModelSchema, SchemaRegistry};
    use crate::text::DisplayText;

    fn schema() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                ModelSchema::new("User")
                    .with_field(FieldDescriptor::new("username", FieldKind::Char)),
            )
            .unwrap();
        registry
            .register(
                ModelSchema::new("Item")
                    .with_field(FieldDescriptor::new("title", FieldKind::Char))
                    .with_field(FieldDescriptor::new("rating", FieldKind::Float))
                    .with_field(
                        FieldDescriptor::new("owner", FieldKind::ForeignKey)
                            .related_to("User")
                            .with_help_text("Owner of the item"),
                    )
                    .with_field(
                        FieldDescriptor::new("watchers", FieldKind::ManyToMany).related_to("User"),
                    ),
            )
            .unwrap();
        registry
    }

    fn item(owner: Option<ObjectRef>) -> ObjectRef {
        let watcher = |pk: i64, name: &str| {
            Value::from(Record::builder("User").pk(pk).field("username", name).build())
        };
        let item: ObjectRef = Record::builder("Item")
            .pk(1)
            .field("title", "Lamp")
            .field("rating", 4.2)
            .field("owner", owner)
            .related("watchers", vec![watcher(2, "bob"), watcher(3, "carol")])
            .build();
        item
    }

    fn alice() -> ObjectRef {
        let user: ObjectRef = Record::builder("User")
            .pk(9)
            .field("username", "alice")
            .build();
        user
    }

    #[test]
    fn test_overrides_win() {
        let registry = schema();
        let resolver = Resolver::new(&registry);
        let config = x("owner")
            .title("Maintainer")
            .detail("Set by admin")
            .kind("custom")
            .template("custom/owner.html")
            .build()
            .unwrap();
        let prop = resolver.resolve_property(&item(Some(alice())), &config);
        assert_eq!(prop.label, DisplayText::from("Maintainer"));
        assert_eq!(prop.detail, Some(DisplayText::from("Set by admin")));
        assert_eq!(prop.kind, TypeTag::Custom("custom".to_string()));
        assert_eq!(prop.template.as_deref(), Some("custom/owner.html"));
    }

    #[test]
    fn test_blank_overrides_ignored() {
        let registry = schema();
        let config = x("owner").title("").kind("").detail("").build().unwrap();
        let prop = Resolver::new(&registry).resolve_property(&item(Some(alice())), &config);
        assert_eq!(prop.label, DisplayText::from("Owner"));
        assert_eq!(prop.kind, TypeTag::ForeignKey);
        assert_eq!(prop.detail, None);
    }

    #[test]
    fn test_link_and_badge_for_single_value() {
        let registry = schema();
        let router = Router::new().route("user-detail", "/users/<int:pk>/").unwrap();
        let resolver = Resolver::new(&registry).with_routes(&router);
        let config = x("owner")
            .link("user-detail")
            .badge(BadgeConfig::new().with_color_map([("9", "primary")]))
            .build()
            .unwrap();
        let prop = resolver.resolve_property(&item(Some(alice())), &config);
        assert_eq!(prop.link_url.as_deref(), Some("/users/9/"));
        assert_eq!(prop.badge_css.as_deref(), Some("badge text-bg-primary"));
        assert_eq!(prop.badge_label, None);
    }

    #[test]
    fn test_no_link_or_badge_for_null_or_many() {
        let registry = schema();
        let router = Router::new().route("user-detail", "/users/<int:pk>/").unwrap();
        let resolver = Resolver::new(&registry).with_routes(&router);

        let owner = x("owner").link("user-detail").badge("info").build().unwrap();
        let prop = resolver.resolve_property(&item(None), &owner);
        assert_eq!(prop.value, Value::Null);
        assert!(prop.link_url.is_none());
        assert!(prop.badge_css.is_none());

        let watchers = x("watchers")
            .link(LinkConfig::new("user-detail"))
            .badge("info")
            .build()
            .unwrap();
        let prop = resolver.resolve_property(&item(None), &watchers);
        assert!(prop.is_many);
        assert!(prop.link_url.is_none());
        assert!(prop.badge_css.is_none());
    }

    #[test]
    fn test_fan_out_through_method_marks_many() {
        let registry = schema();
        let tag = Value::from(Record::builder("Tag").pk(1).field("name", "x").build());
        let holder: ObjectRef = Record::builder("Unknown")
            .related("labels", vec![tag])
            .build();
        let prop = Resolver::new(&registry)
            .resolve_property(&holder, &PropertyConfig::new("labels__name").unwrap());
        assert!(prop.is_many);
        assert_eq!(prop.value, Value::List(vec![Value::from("x")]));
        assert_eq!(prop.kind, TypeTag::Default);
    }
}
