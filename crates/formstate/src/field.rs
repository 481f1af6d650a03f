// File: src/field.rs
// Purpose: Field descriptors and the per-field validation state machine

use std::fmt;

use serde::Serialize;

use crate::attrs::FieldAttrs;
use crate::state::FieldState;
use formstate_rules::{
    first_failure, resolve_error, resolve_success, BlankPolicy, ConfigError, Constraint,
    ConstraintKind, ConstraintSpec, EvalOptions, Messages,
};

/// Handle returned by registration. Never reused within a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FieldId(pub(crate) u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declarative description of a field, built before registration.
///
/// Constraints are evaluated in the order the builder methods are called.
/// Pattern syntax is only checked when the descriptor is registered.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    constraints: Vec<ConstraintSpec>,
    messages: Messages,
    multiline: bool,
    attrs: FieldAttrs,
    blank: Option<BlankPolicy>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
            messages: Messages::default(),
            multiline: false,
            attrs: FieldAttrs::new(),
            blank: None,
        }
    }

    pub fn constraint(mut self, spec: ConstraintSpec) -> Self {
        self.constraints.push(spec);
        self
    }

    pub fn required(self) -> Self {
        self.constraint(ConstraintSpec::Required)
    }

    pub fn min_length(self, min: usize) -> Self {
        self.constraint(ConstraintSpec::MinLength(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.constraint(ConstraintSpec::MaxLength(max))
    }

    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        self.constraint(ConstraintSpec::Pattern(pattern.into()))
    }

    pub fn email(self) -> Self {
        self.constraint(ConstraintSpec::Email)
    }

    pub fn url(self) -> Self {
        self.constraint(ConstraintSpec::Url)
    }

    pub fn min(self, min: f64) -> Self {
        self.constraint(ConstraintSpec::Min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.constraint(ConstraintSpec::Max(max))
    }

    /// Render as a multi-line input. Has no effect on validation.
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.messages = self.messages.with_success(message);
        self
    }

    pub fn error_message(mut self, kind: ConstraintKind, message: impl Into<String>) -> Self {
        self.messages = self.messages.with_error(kind, message);
        self
    }

    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    pub fn attrs(mut self, attrs: FieldAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Override the form's whitespace handling for `required`
    pub fn blank_policy(mut self, policy: BlankPolicy) -> Self {
        self.blank = Some(policy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint_specs(&self) -> &[ConstraintSpec] {
        &self.constraints
    }

    pub fn message_overrides(&self) -> &Messages {
        &self.messages
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn field_attrs(&self) -> &FieldAttrs {
        &self.attrs
    }
}

/// A registered field: compiled constraints plus live state.
#[derive(Debug, Clone)]
pub struct Field {
    id: FieldId,
    descriptor: FieldDescriptor,
    constraints: Vec<Constraint>,
    state: FieldState,
}

impl Field {
    /// Compile a descriptor. Fails on an empty name or a bad pattern.
    pub(crate) fn compile(id: FieldId, descriptor: FieldDescriptor) -> Result<Self, ConfigError> {
        if descriptor.name.trim().is_empty() {
            return Err(ConfigError::EmptyFieldName);
        }

        let constraints = descriptor
            .constraints
            .iter()
            .map(ConstraintSpec::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            descriptor,
            constraints,
            state: FieldState::new(),
        })
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub(crate) fn into_descriptor(self) -> FieldDescriptor {
        self.descriptor
    }

    /// Value change. Validates right away in immediate mode or once the
    /// field has been touched; otherwise only the value is stored.
    pub fn change(
        &mut self,
        value: impl Into<String>,
        immediate: bool,
        options: &EvalOptions,
    ) -> &FieldState {
        self.state.set_value(value.into());

        if immediate || self.state.touched() {
            self.validate(options);
        } else {
            tracing::trace!(field = %self.descriptor.name, "deferred validation until blur");
        }

        &self.state
    }

    /// Focus left the field. Always validates.
    pub fn blur(&mut self, options: &EvalOptions) -> &FieldState {
        self.validate(options);
        &self.state
    }

    /// Validate regardless of mode or touched state, as on submit.
    pub fn force_validate(&mut self, options: &EvalOptions) -> &FieldState {
        self.validate(options);
        &self.state
    }

    fn validate(&mut self, options: &EvalOptions) {
        let options = EvalOptions {
            blank: self.descriptor.blank.unwrap_or(options.blank),
            ..*options
        };

        match first_failure(self.state.value(), &self.constraints, &options) {
            Some(constraint) => {
                let message = resolve_error(&self.descriptor.messages, constraint);
                self.state.mark_invalid(constraint.clone(), message);
            }
            None => self.state.mark_valid(resolve_success(&self.descriptor.messages)),
        }

        tracing::debug!(
            field = %self.descriptor.name,
            validity = ?self.state.validity(),
            message = ?self.state.message(),
            "field validated"
        );
    }
}
