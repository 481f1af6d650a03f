// File: src/messages.rs
// Purpose: Default message table and per-field message resolution

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::constraint::{Constraint, ConstraintKind};

/// Built-in error templates, keyed by constraint kind.
///
/// `{name}` placeholders are filled from [`Constraint::placeholders`].
static DEFAULT_MESSAGES: Lazy<HashMap<ConstraintKind, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (ConstraintKind::Required, "This field is required"),
        (ConstraintKind::MinLength, "Enter at least {minLength} characters"),
        (ConstraintKind::MaxLength, "Enter no more than {maxLength} characters"),
        (ConstraintKind::Pattern, "Input value does not match the pattern"),
        (ConstraintKind::Email, "Please enter a valid email address"),
        (ConstraintKind::Url, "Please enter a valid URL"),
        (ConstraintKind::Min, "Value must be at least {min}"),
        (ConstraintKind::Max, "Value must be at most {max}"),
    ])
});

/// The built-in template for a constraint kind.
pub fn default_template(kind: ConstraintKind) -> &'static str {
    DEFAULT_MESSAGES.get(&kind).copied().unwrap_or("Invalid value")
}

/// Replace every `{name}` in `template` with the constraint's parameters.
///
/// Plain substring replacement; unknown placeholders are left as written.
pub fn interpolate(template: &str, constraint: &Constraint) -> String {
    constraint
        .placeholders()
        .into_iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), &value)
        })
}

/// Caller-supplied message overrides for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    /// Shown when the field is valid; no success feedback without it
    pub success: Option<String>,

    /// Replaces the default template for a constraint kind, verbatim
    pub errors: HashMap<ConstraintKind, String>,
}

impl Messages {
    pub fn with_success(mut self, message: impl Into<String>) -> Self {
        self.success = Some(message.into());
        self
    }

    pub fn with_error(mut self, kind: ConstraintKind, message: impl Into<String>) -> Self {
        self.errors.insert(kind, message.into());
        self
    }
}

/// Display text for a failing constraint.
pub fn resolve_error(messages: &Messages, constraint: &Constraint) -> String {
    match messages.errors.get(&constraint.kind()) {
        Some(custom) => custom.clone(),
        None => interpolate(default_template(constraint.kind()), constraint),
    }
}

/// Display text for a valid field, if one was configured.
pub fn resolve_success(messages: &Messages) -> Option<String> {
    messages.success.clone()
}
