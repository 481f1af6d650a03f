// File: src/error.rs
// Purpose: Errors surfaced to the integrating application

use thiserror::Error;

use crate::field::FieldId;
use formstate_rules::ConfigError;

#[derive(Debug, Error)]
pub enum FormError {
    /// Malformed field configuration, reported at registration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Id was never issued or its field has been unregistered
    #[error("no field registered with id {0}")]
    UnknownField(FieldId),

    #[error("no field registered with name `{0}`")]
    UnknownFieldName(String),
}
