// File: src/error.rs
// Purpose: Configuration errors raised while building a form

use thiserror::Error;

/// Malformed field configuration.
///
/// These surface at registration time. A value failing a constraint is never
/// an error; it is reported through the field state instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown constraint `{0}`")]
    UnknownConstraint(String),

    #[error("field name must not be empty")]
    EmptyFieldName,

    #[error("field `{0}` is already registered")]
    DuplicateField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::DuplicateField("email".to_string());
        assert_eq!(err.to_string(), "field `email` is already registered");
        assert_eq!(
            ConfigError::EmptyFieldName.to_string(),
            "field name must not be empty"
        );
    }
}
