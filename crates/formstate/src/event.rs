// File: src/event.rs
// Purpose: Name-addressed interaction events for replaying scripts

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::form::{Form, SubmitOutcome};
use crate::state::FieldState;

/// One user interaction, addressed by field name.
///
/// JSON shape: `{"event": "change", "field": "firstName", "value": "a"}`,
/// `{"event": "blur", "field": "firstName"}`, `{"event": "submit"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum FormEvent {
    Change { field: String, value: String },
    Blur { field: String },
    Submit,
}

impl FormEvent {
    pub fn change(field: impl Into<String>, value: impl Into<String>) -> Self {
        FormEvent::Change {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn blur(field: impl Into<String>) -> Self {
        FormEvent::Blur { field: field.into() }
    }

    /// Parse a JSON array of events
    pub fn parse_script(json: &str) -> Result<Vec<FormEvent>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// What a dispatched event produced
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    Field(FieldState),
    Submit(SubmitOutcome),
}

impl Form {
    /// Route an event to the field it names, or submit the form.
    pub fn dispatch(&mut self, event: &FormEvent) -> Result<DispatchResult, FormError> {
        tracing::trace!(?event, "dispatching event");

        match event {
            FormEvent::Change { field, value } => {
                let id = self.lookup(field)?;
                Ok(DispatchResult::Field(self.change(id, value.as_str())?.clone()))
            }
            FormEvent::Blur { field } => {
                let id = self.lookup(field)?;
                Ok(DispatchResult::Field(self.blur(id)?.clone()))
            }
            FormEvent::Submit => Ok(DispatchResult::Submit(self.submit())),
        }
    }

    fn lookup(&self, name: &str) -> Result<crate::field::FieldId, FormError> {
        self.field_id(name)
            .ok_or_else(|| FormError::UnknownFieldName(name.to_string()))
    }
}
