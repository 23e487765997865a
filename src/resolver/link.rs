//! Link URLs and badges for single resolved values

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{BadgeConfig, LinkConfig};
use crate::instance::{Attribute, Value};
use crate::routes::RouteResolver;

/// Build the link URL for a single, non-null value.
///
/// Parameters are read off the value: positional `args`, then keyword
/// `kwargs`, else `pk`. Any failure yields `None`.
pub(crate) fn link_url(
    routes: Option<&dyn RouteResolver>,
    link: &LinkConfig,
    value: &Value,
) -> Option<String> {
    let Some(routes) = routes else {
        debug!(route = %link.url, "no route resolver configured");
        return None;
    };

    let result = match (&link.args, &link.kwargs) {
        (Some(args), _) => {
            let args = args
                .iter()
                .map(|name| param(value, name))
                .collect::<Option<Vec<_>>>()?;
            routes.reverse(&link.url, &args, &BTreeMap::new())
        }
        (None, Some(kwargs)) => {
            let kwargs = kwargs
                .iter()
                .map(|(key, name)| param(value, name).map(|v| (key.clone(), v)))
                .collect::<Option<BTreeMap<_, _>>>()?;
            routes.reverse(&link.url, &[], &kwargs)
        }
        (None, None) => {
            let pk = param(value, "pk")?;
            let kwargs = BTreeMap::from([("pk".to_string(), pk)]);
            routes.reverse(&link.url, &[], &kwargs)
        }
    };

    match result {
        Ok(url) => Some(url),
        Err(e) => {
            debug!(route = %link.url, error = %e, "link not resolved");
            None
        }
    }
}

/// Read a route parameter off the value
fn param(value: &Value, name: &str) -> Option<String> {
    let Value::Object(obj) = value else {
        debug!(attribute = name, "link parameter read from a non-object value");
        return None;
    };
    let resolved = match obj.attr(name) {
        Some(Attribute::Value(v)) => v,
        Some(Attribute::Callable(call)) => call(),
        Some(Attribute::Collection(_)) | None => {
            debug!(model = obj.model(), attribute = name, "link parameter unavailable");
            return None;
        }
    };
    resolved.key()
}

/// Badge CSS classes and optional label for a single, non-null value
pub(crate) fn badge(config: &BadgeConfig, value: &Value) -> (String, Option<String>) {
    (config.css_class(value), config.label_for(value))
}
