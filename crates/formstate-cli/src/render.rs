//! Feedback markup for validated fields
//!
//! Renders each field as an `<input>` or `<textarea>` followed by its
//! success or error feedback. Pass-through attributes are forwarded
//! verbatim; attribute names maud cannot express statically are spliced in
//! with their values escaped.

use formstate::{ConstraintSpec, Field, FieldDescriptor, Form, Validity};
use maud::{html, Markup, PreEscaped};

/// Render every field of the form in registration order
pub fn render_form(form: &Form) -> Markup {
    html! {
        form novalidate {
            @for field in form.fields() {
                (render_field(field))
            }
        }
    }
}

pub fn render_field(field: &Field) -> Markup {
    let descriptor = field.descriptor();
    let state = field.state();

    html! {
        div class="form-group" {
            @if descriptor.is_multiline() {
                (PreEscaped("<textarea"))
                (attributes(field))
                (PreEscaped(">"))
                (state.value())
                (PreEscaped("</textarea>"))
            } @else {
                (PreEscaped("<input"))
                (attributes(field))
                (PreEscaped(">"))
            }
            @match (state.validity(), state.message()) {
                (Validity::Valid, Some(message)) => {
                    div class="valid-feedback" { (message) }
                }
                (Validity::Invalid, Some(message)) => {
                    div class="invalid-feedback" { (message) }
                }
                _ => {}
            }
        }
    }
}

fn attributes(field: &Field) -> Markup {
    let descriptor = field.descriptor();
    let state = field.state();
    let forwarded = descriptor.field_attrs();
    let class = control_class(forwarded.get("class"), state.validity());
    // A forwarded `type` replaces the derived one; constraint attributes
    // always come from the declared constraints.
    let native: Vec<_> = html5_attrs(descriptor)
        .into_iter()
        .filter(|(name, _)| *name != "type" || forwarded.get("type").is_none())
        .collect();

    html! {
        (attr("name", descriptor.name()))
        (attr("class", &class))
        @for (name, value) in &native {
            (attr(name, value))
        }
        @for (name, value) in forwarded.iter() {
            @if !is_reserved(name, &native) && is_attr_name(name) {
                (attr(name, value))
            }
        }
        @if !descriptor.is_multiline() && !state.value().is_empty() {
            (attr("value", state.value()))
        }
    }
}

/// Native constraint attributes mirroring the declared constraints
fn html5_attrs(descriptor: &FieldDescriptor) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    if !descriptor.is_multiline() {
        let input_type = descriptor
            .constraint_specs()
            .iter()
            .find_map(|spec| match spec {
                ConstraintSpec::Email => Some("email"),
                ConstraintSpec::Url => Some("url"),
                ConstraintSpec::Min(_) | ConstraintSpec::Max(_) => Some("number"),
                _ => None,
            })
            .unwrap_or("text");
        attrs.push(("type", input_type.to_string()));
    }

    for spec in descriptor.constraint_specs() {
        match spec {
            ConstraintSpec::Required => attrs.push(("required", String::new())),
            ConstraintSpec::MinLength(n) => attrs.push(("minlength", n.to_string())),
            ConstraintSpec::MaxLength(n) => attrs.push(("maxlength", n.to_string())),
            ConstraintSpec::Pattern(p) => attrs.push(("pattern", p.clone())),
            ConstraintSpec::Min(n) => attrs.push(("min", n.to_string())),
            ConstraintSpec::Max(n) => attrs.push(("max", n.to_string())),
            ConstraintSpec::Email | ConstraintSpec::Url => {}
        }
    }
    attrs
}

fn control_class(custom: Option<&str>, validity: Validity) -> String {
    let state_class = match validity {
        Validity::Valid => Some("is-valid"),
        Validity::Invalid => Some("is-invalid"),
        Validity::Unvalidated => None,
    };

    ["form-control"]
        .into_iter()
        .chain(custom)
        .chain(state_class)
        .collect::<Vec<_>>()
        .join(" ")
}

// Empty value renders as a bare boolean attribute
fn attr(name: &str, value: &str) -> Markup {
    html! {
        " " (PreEscaped(name))
        @if !value.is_empty() {
            (PreEscaped("=\"")) (value) (PreEscaped("\""))
        }
    }
}

fn is_reserved(name: &str, native: &[(&'static str, String)]) -> bool {
    matches!(name, "name" | "class" | "value") || native.iter().any(|(n, _)| *n == name)
}

fn is_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}
