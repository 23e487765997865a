//! Built-in `split-card` layout pack and `default` type pack

use super::html::{escape, format_text};
use super::{RenderContext, RenderError, TemplateRegistry};
use crate::instance::Value;
use crate::resolver::ResolvedProperty;

pub const LAYOUT_PACK: &str = "split-card";
pub const TYPES_PACK: &str = "default";

/// Rendered for null values
const EMPTY: &str = "&mdash;";

type Result<T> = std::result::Result<T, RenderError>;

pub(super) fn register(registry: &mut TemplateRegistry) {
    registry.register(format!("{}/object_detail.html", LAYOUT_PACK), object_detail);
    registry.register(format!("{}/group.html", LAYOUT_PACK), group);
    registry.register(format!("{}/property.html", LAYOUT_PACK), property);

    for kind in ["char", "date", "datetime", "integer", "float", "foreignkey", "default"] {
        registry.register(format!("{}/types/{}.html", TYPES_PACK, kind), scalar);
    }
    registry.register(format!("{}/types/text.html", TYPES_PACK), text);
    registry.register(format!("{}/types/boolean.html", TYPES_PACK), boolean);
    registry.register(format!("{}/types/manytomany.html", TYPES_PACK), many);
}

fn object_detail(ctx: &RenderContext<'_>) -> Result<String> {
    let mut html = String::from("<div class=\"object-detail\">\n");
    for group in ctx.groups()? {
        html.push_str(&ctx.renderer.render_group(group)?);
        html.push('\n');
    }
    html.push_str("</div>");
    Ok(html)
}

fn group(ctx: &RenderContext<'_>) -> Result<String> {
    let group = ctx.group()?;

    let icon = match &group.icon {
        Some(icon) => format!(
            "<i class=\"{} me-2\"></i>",
            escape(&ctx.renderer.icon_class(icon))
        ),
        None => String::new(),
    };
    let description = match &group.description {
        Some(d) => format!("\n      <p class=\"text-muted small mb-0\">{}</p>", ctx.text(d)),
        None => String::new(),
    };
    let mut rows = String::new();
    for prop in &group.properties {
        rows.push_str("        ");
        rows.push_str(&ctx.renderer.render_property(prop)?);
        rows.push('\n');
    }

    Ok(format!(
        concat!(
            "<div class=\"card mb-4\">\n",
            "  <div class=\"row g-0\">\n",
            "    <div class=\"col-md-3 border-end p-3\">\n",
            "      <h5 class=\"mb-1\">{}{}</h5>{}\n",
            "    </div>\n",
            "    <div class=\"col-md-9 p-3\">\n",
            "      <dl class=\"row mb-0\">\n",
            "{}",
            "      </dl>\n",
            "    </div>\n",
            "  </div>\n",
            "</div>"
        ),
        icon,
        ctx.text(&group.title),
        description,
        rows
    ))
}

fn property(ctx: &RenderContext<'_>) -> Result<String> {
    let prop = ctx.property()?;

    let detail = match &prop.detail {
        Some(detail) => {
            let class = ctx.renderer.named_icon_class("property-detail");
            let icon = if class.is_empty() {
                String::new()
            } else {
                format!("<i class=\"{} me-1\"></i>", escape(&class))
            };
            format!(
                "<small class=\"d-block text-muted fw-normal\">{}{}</small>",
                icon,
                ctx.text(detail)
            )
        }
        None => String::new(),
    };

    Ok(format!(
        "<dt class=\"col-sm-4\">{}{}</dt><dd class=\"col-sm-8\">{}</dd>",
        ctx.text(&prop.label),
        detail,
        ctx.renderer.render_property_value(prop)?
    ))
}

/// Wrap rendered value HTML in its badge and link
fn decorate(prop: &ResolvedProperty, inner: String) -> String {
    let mut html = inner;
    if let Some(css) = &prop.badge_css {
        let label = match &prop.badge_label {
            Some(label) => escape(label).into_owned(),
            None => html,
        };
        html = format!("<span class=\"{}\">{}</span>", escape(css), label);
    }
    if let Some(url) = &prop.link_url {
        html = format!("<a href=\"{}\">{}</a>", escape(url), html);
    }
    html
}

fn scalar(ctx: &RenderContext<'_>) -> Result<String> {
    let prop = ctx.property()?;
    if prop.is_many {
        return Ok(list(prop));
    }
    Ok(scalar_value(prop))
}

fn scalar_value(prop: &ResolvedProperty) -> String {
    if prop.value.is_null() {
        return EMPTY.to_string();
    }
    decorate(prop, escape(&prop.value.to_string()).into_owned())
}

fn text(ctx: &RenderContext<'_>) -> Result<String> {
    let prop = ctx.property()?;
    if prop.is_many {
        return Ok(list(prop));
    }
    if prop.value.is_null() {
        return Ok(EMPTY.to_string());
    }
    let body = format_text(&prop.value.to_string(), ctx.settings().property_text_newline);
    Ok(decorate(prop, body))
}

fn boolean(ctx: &RenderContext<'_>) -> Result<String> {
    let prop = ctx.property()?;
    if prop.is_many {
        return Ok(list(prop));
    }
    let (name, color) = match prop.value.as_bool() {
        Some(true) => ("boolean-true", "text-success"),
        Some(false) => ("boolean-false", "text-danger"),
        None => return Ok(scalar_value(prop)),
    };
    let class = ctx.renderer.named_icon_class(name);
    let icon = if class.is_empty() {
        escape(&prop.value.to_string()).into_owned()
    } else {
        format!("<i class=\"{} {}\"></i>", escape(&class), color)
    };
    Ok(decorate(prop, icon))
}

fn many(ctx: &RenderContext<'_>) -> Result<String> {
    Ok(list(ctx.property()?))
}

/// Many-valued properties render as an unstyled list
fn list(prop: &ResolvedProperty) -> String {
    let items = match &prop.value {
        Value::List(items) => items,
        _ => return scalar_value(prop),
    };
    if items.is_empty() {
        return EMPTY.to_string();
    }
    let mut html = String::from("<ul class=\"list-unstyled mb-0\">");
    for item in items {
        html.push_str("<li>");
        html.push_str(&escape(&item.to_string()));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Renderer;
    use crate::settings::{IconLibrary, NewlineMode, Settings};

    fn render_value(settings: &Settings, prop: &ResolvedProperty) -> String {
        let registry = TemplateRegistry::with_builtins();
        Renderer::new(&registry, settings)
            .render_property_value(prop)
            .unwrap()
    }

    #[test]
    fn test_char_value_escaped() {
        let prop = ResolvedProperty::new("t", "T", "<b>X</b>").with_kind("char");
        assert_eq!(render_value(&Settings::default(), &prop), "&lt;b&gt;X&lt;/b&gt;");
    }

    #[test]
    fn test_null_renders_dash() {
        let prop = ResolvedProperty::new("t", "T", Value::Null).with_kind("char");
        assert_eq!(render_value(&Settings::default(), &prop), "&mdash;");
    }

    #[test]
    fn test_boolean_icons() {
        let yes = ResolvedProperty::new("t", "T", true).with_kind("boolean");
        let no = ResolvedProperty::new("t", "T", false).with_kind("boolean");
        assert_eq!(
            render_value(&Settings::default(), &yes),
            "<i class=\"bi bi-check-circle-fill text-success\"></i>"
        );
        assert_eq!(
            render_value(&Settings::default(), &no),
            "<i class=\"bi bi-x-circle-fill text-danger\"></i>"
        );

        let fa = Settings::new().with_icons_library(IconLibrary::FontAwesome);
        assert!(render_value(&fa, &yes).contains("fa-regular fa-circle-check"));
    }

    #[test]
    fn test_text_newline_modes() {
        let prop = ResolvedProperty::new("t", "T", "a\nb\n\nc").with_kind("text");
        assert_eq!(
            render_value(&Settings::default(), &prop),
            "a<br>b<br><br>c"
        );
        let paragraphs = Settings::new().with_newline_mode(NewlineMode::Linebreaks);
        assert_eq!(
            render_value(&paragraphs, &prop),
            "<p>a<br>b</p>\n\n<p>c</p>"
        );
    }

    #[test]
    fn test_many_to_many_list() {
        let prop = ResolvedProperty::new("tags", "Tags", vec!["a", "b"])
            .with_kind("manytomany")
            .many();
        assert_eq!(
            render_value(&Settings::default(), &prop),
            "<ul class=\"list-unstyled mb-0\"><li>a</li><li>b</li></ul>"
        );

        let empty = ResolvedProperty::new("tags", "Tags", Value::Null)
            .with_kind("manytomany")
            .many();
        assert_eq!(render_value(&Settings::default(), &empty), "&mdash;");
    }

    #[test]
    fn test_many_scalar_values_render_as_list() {
        let prop = ResolvedProperty::new("tags__name", "Tags", vec!["x", "y"])
            .with_kind("char")
            .many();
        assert_eq!(
            render_value(&Settings::default(), &prop),
            "<ul class=\"list-unstyled mb-0\"><li>x</li><li>y</li></ul>"
        );
    }

    #[test]
    fn test_link_and_badge_decoration() {
        let prop = ResolvedProperty::new("owner", "Owner", "alice")
            .with_kind("foreignkey")
            .with_link_url("/users/1/")
            .with_badge("badge text-bg-info", None);
        assert_eq!(
            render_value(&Settings::default(), &prop),
            "<a href=\"/users/1/\"><span class=\"badge text-bg-info\">alice</span></a>"
        );

        let labelled = ResolvedProperty::new("in_stock", "In stock", true)
            .with_kind("boolean")
            .with_badge("badge text-bg-success", Some("In Stock".to_string()));
        assert_eq!(
            render_value(&Settings::default(), &labelled),
            "<span class=\"badge text-bg-success\">In Stock</span>"
        );
    }

    #[test]
    fn test_unknown_type_falls_back_to_default() {
        let prop = ResolvedProperty::new("t", "T", 5).with_kind("timestamp");
        assert_eq!(render_value(&Settings::default(), &prop), "5");
    }
}
