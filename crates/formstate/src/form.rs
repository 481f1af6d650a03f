// File: src/form.rs
// Purpose: Field registration, event ingestion and submission gating

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::field::{Field, FieldDescriptor, FieldId};
use crate::state::FieldState;
use formstate_rules::{BlankPolicy, ConfigError, EvalOptions, EvaluationOrder};

/// Form-wide validation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    /// Validate on every change instead of waiting for blur or submit
    #[serde(default = "default_true")]
    pub immediate: bool,

    /// Whitespace handling for `required`
    #[serde(default)]
    pub blank: BlankPolicy,

    /// Constraint visiting order
    #[serde(default)]
    pub order: EvaluationOrder,
}

fn default_true() -> bool {
    true
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            immediate: true,
            blank: BlankPolicy::default(),
            order: EvaluationOrder::default(),
        }
    }
}

impl FormOptions {
    pub fn deferred() -> Self {
        Self {
            immediate: false,
            ..Self::default()
        }
    }

    fn eval(&self) -> EvalOptions {
        EvalOptions {
            blank: self.blank,
            order: self.order,
        }
    }
}

/// Field values handed to the submit callback, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "outcome")]
pub enum SubmitOutcome {
    /// Every field was valid; the callback received these values
    Submitted { values: FormValues },
    /// At least one field was invalid; names in registration order
    Blocked { invalid: Vec<String> },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted { .. })
    }
}

/// Errors and values by field name, for presenters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    /// Field names to error messages
    pub errors: BTreeMap<String, String>,
    /// Current field values
    pub values: BTreeMap<String, String>,
    /// Aggregate validity at the time of the snapshot
    pub valid: bool,
}

impl FormSnapshot {
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn get_value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(|s| s.as_str())
    }
}

type SubmitHandler = Box<dyn FnMut(&FormValues)>;

/// A set of registered fields and the submit gate in front of them.
///
/// Fields iterate in registration order. Each field's state is touched only
/// by events addressed to it, or by the forced pass on submit.
pub struct Form {
    options: FormOptions,
    fields: BTreeMap<FieldId, Field>,
    names: HashMap<String, FieldId>,
    next_id: u32,
    on_submit: Option<SubmitHandler>,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("options", &self.options)
            .field("fields", &self.fields)
            .field("on_submit", &self.on_submit.is_some())
            .finish()
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new(FormOptions::default())
    }
}

impl Form {
    pub fn new(options: FormOptions) -> Self {
        Self {
            options,
            fields: BTreeMap::new(),
            names: HashMap::new(),
            next_id: 0,
            on_submit: None,
        }
    }

    /// Set the callback invoked with the field values on a successful submit
    pub fn on_submit(mut self, handler: impl FnMut(&FormValues) + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Register a field. Its state starts out `Unvalidated`.
    pub fn register(&mut self, descriptor: FieldDescriptor) -> Result<FieldId, FormError> {
        if self.names.contains_key(descriptor.name()) {
            return Err(ConfigError::DuplicateField(descriptor.name().to_string()).into());
        }

        let id = FieldId(self.next_id);
        let field = Field::compile(id, descriptor)?;
        self.next_id += 1;

        tracing::debug!(field = %field.name(), %id, "field registered");
        self.names.insert(field.name().to_string(), id);
        self.fields.insert(id, field);
        Ok(id)
    }

    /// Remove a field and its state, returning the descriptor.
    pub fn unregister(&mut self, id: FieldId) -> Result<FieldDescriptor, FormError> {
        let field = self.fields.remove(&id).ok_or(FormError::UnknownField(id))?;
        self.names.remove(field.name());

        tracing::debug!(field = %field.name(), %id, "field unregistered");
        Ok(field.into_descriptor())
    }

    pub fn change(&mut self, id: FieldId, value: impl Into<String>) -> Result<&FieldState, FormError> {
        let immediate = self.options.immediate;
        let eval = self.options.eval();
        let field = self.field_mut(id)?;
        Ok(field.change(value, immediate, &eval))
    }

    pub fn blur(&mut self, id: FieldId) -> Result<&FieldState, FormError> {
        let eval = self.options.eval();
        let field = self.field_mut(id)?;
        Ok(field.blur(&eval))
    }

    /// Force-validate every field in registration order, then submit only if
    /// all of them are valid.
    pub fn submit(&mut self) -> SubmitOutcome {
        let eval = self.options.eval();
        let invalid: Vec<String> = self
            .fields
            .values_mut()
            .filter_map(|field| {
                let valid = field.force_validate(&eval).is_valid();
                (!valid).then(|| field.name().to_string())
            })
            .collect();

        if !invalid.is_empty() {
            tracing::warn!(?invalid, "submit blocked");
            return SubmitOutcome::Blocked { invalid };
        }

        let values = self.values();
        tracing::info!(fields = values.len(), "form submitted");
        if let Some(handler) = self.on_submit.as_mut() {
            handler(&values);
        }
        SubmitOutcome::Submitted { values }
    }

    /// True only when every registered field is `Valid`.
    ///
    /// An `Unvalidated` field counts as not valid. A form with no fields is
    /// vacuously valid.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|f| f.state().is_valid())
    }

    pub fn field_state(&self, id: FieldId) -> Option<&FieldState> {
        self.fields.get(&id).map(Field::state)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(&id)
    }

    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.names.get(name).copied()
    }

    /// Registered fields in registration order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn values(&self) -> FormValues {
        FormValues(
            self.fields
                .values()
                .map(|f| (f.name().to_string(), f.state().value().to_string()))
                .collect(),
        )
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let errors = self
            .fields
            .values()
            .filter(|f| f.state().is_invalid())
            .filter_map(|f| Some((f.name().to_string(), f.state().message()?.to_string())))
            .collect();

        FormSnapshot {
            errors,
            values: self.values().0,
            valid: self.is_valid(),
        }
    }

    fn field_mut(&mut self, id: FieldId) -> Result<&mut Field, FormError> {
        self.fields.get_mut(&id).ok_or(FormError::UnknownField(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Validity;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_register_rejects_duplicate_names() {
        let mut form = Form::default();
        form.register(FieldDescriptor::new("email")).unwrap();
        let err = form.register(FieldDescriptor::new("email")).unwrap_err();
        assert!(matches!(err, FormError::Config(ConfigError::DuplicateField(ref n)) if n == "email"));
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn test_failed_registration_leaves_form_untouched() {
        let mut form = Form::default();
        assert!(form.register(FieldDescriptor::new("code").pattern("(")).is_err());
        assert!(form.is_empty());
        assert_eq!(form.field_id("code"), None);
    }

    #[test]
    fn test_unregister_frees_the_name() {
        let mut form = Form::default();
        let id = form.register(FieldDescriptor::new("email").required()).unwrap();

        let descriptor = form.unregister(id).unwrap();
        assert_eq!(descriptor.name(), "email");
        assert!(form.field_state(id).is_none());
        assert!(matches!(form.change(id, "x"), Err(FormError::UnknownField(_))));

        let again = form.register(FieldDescriptor::new("email")).unwrap();
        assert_ne!(again, id);
    }

    #[test]
    fn test_unvalidated_field_is_not_valid() {
        let mut form = Form::default();
        form.register(FieldDescriptor::new("nickname")).unwrap();
        assert!(!form.is_valid());
    }

    #[test]
    fn test_submit_validates_untouched_fields() {
        let mut form = Form::default();
        let id = form.register(FieldDescriptor::new("firstName").required()).unwrap();

        let outcome = form.submit();
        assert_eq!(
            outcome,
            SubmitOutcome::Blocked {
                invalid: vec!["firstName".to_string()]
            }
        );
        let state = form.field_state(id).unwrap();
        assert_eq!(state.validity(), Validity::Invalid);
        assert_eq!(state.message(), Some("This field is required"));
    }

    #[test]
    fn test_submit_callback_only_runs_when_valid() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);

        let mut form = Form::new(FormOptions::deferred())
            .on_submit(move |values| sink.borrow_mut().push(values.clone()));
        let id = form.register(FieldDescriptor::new("firstName").required()).unwrap();

        assert!(!form.submit().is_submitted());
        assert!(received.borrow().is_empty());

        form.change(id, "test").unwrap();
        assert!(form.submit().is_submitted());

        let received = received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].get("firstName"), Some("test"));
    }

    #[test]
    fn test_snapshot_reports_errors_and_values() {
        let mut form = Form::default();
        let first = form.register(FieldDescriptor::new("first").required()).unwrap();
        let last = form.register(FieldDescriptor::new("last").min_length(3)).unwrap();

        form.change(first, "").unwrap();
        form.change(last, "Smith").unwrap();

        let snapshot = form.snapshot();
        assert!(snapshot.has_error("first"));
        assert!(!snapshot.has_error("last"));
        assert_eq!(snapshot.get_error("first"), Some("This field is required"));
        assert_eq!(snapshot.get_value("last"), Some("Smith"));
        assert!(!snapshot.valid);
    }

    #[test]
    fn test_fields_iterate_in_registration_order() {
        let mut form = Form::default();
        for name in ["zeta", "alpha", "mid"] {
            form.register(FieldDescriptor::new(name)).unwrap();
        }
        let names: Vec<&str> = form.fields().map(Field::name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }
}
