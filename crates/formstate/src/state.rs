// File: src/state.rs
// Purpose: Observable per-field validation state

use serde::{Serialize, Serializer};

use formstate_rules::Constraint;

/// Tri-state validity of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    /// Not evaluated yet; only possible while untouched
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

/// What a presenter needs to render one field.
///
/// Fields are private so the invariants hold by construction:
/// `Unvalidated` carries neither message nor failing constraint, and
/// `Invalid` always carries a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldState {
    value: String,
    touched: bool,
    validity: Validity,
    message: Option<String>,
    #[serde(serialize_with = "serialize_failing")]
    failing: Option<Constraint>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn is_valid(&self) -> bool {
        self.validity == Validity::Valid
    }

    pub fn is_invalid(&self) -> bool {
        self.validity == Validity::Invalid
    }

    /// Success or error text, when there is any to show
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The constraint behind an `Invalid` state
    pub fn failing(&self) -> Option<&Constraint> {
        self.failing.as_ref()
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }

    /// Overwrite with a passing evaluation
    pub(crate) fn mark_valid(&mut self, success: Option<String>) {
        self.touched = true;
        self.validity = Validity::Valid;
        self.message = success;
        self.failing = None;
    }

    /// Overwrite with a failing evaluation
    pub(crate) fn mark_invalid(&mut self, constraint: Constraint, message: String) {
        self.touched = true;
        self.validity = Validity::Invalid;
        self.message = Some(message);
        self.failing = Some(constraint);
    }
}

fn serialize_failing<S: Serializer>(
    failing: &Option<Constraint>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    failing.as_ref().map(Constraint::spec).serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_state_is_unvalidated() {
        let state = FieldState::new();
        assert_eq!(state.validity(), Validity::Unvalidated);
        assert!(!state.touched());
        assert_eq!(state.message(), None);
        assert!(state.failing().is_none());
    }

    #[test]
    fn test_valid_clears_previous_failure() {
        let mut state = FieldState::new();
        state.mark_invalid(Constraint::Required, "This field is required".to_string());
        assert!(state.is_invalid());
        assert_eq!(state.failing(), Some(&Constraint::Required));

        state.mark_valid(None);
        assert!(state.is_valid());
        assert_eq!(state.message(), None);
        assert!(state.failing().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let mut state = FieldState::new();
        state.set_value("a".to_string());
        state.mark_invalid(Constraint::MinLength(4), "Enter at least 4 characters".to_string());

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "value": "a",
                "touched": true,
                "validity": "invalid",
                "message": "Enter at least 4 characters",
                "failing": { "minLength": 4 }
            })
        );
    }
}
