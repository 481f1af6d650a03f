// File: src/config.rs
// Purpose: Declarative form definitions parsed from TOML

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::attrs::FieldAttrs;
use crate::error::FormError;
use crate::field::FieldDescriptor;
use crate::form::{Form, FormOptions};
use formstate_rules::{ConstraintKind, ConstraintSpec, Messages};

/// A whole form: options plus fields in registration order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub form: FormOptions,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One `[[fields]]` entry.
///
/// Rule keys are flat (`required = true`, `minLength = 4`) and become
/// constraints in a fixed order: required, minLength, maxLength, pattern,
/// email, url, min, max.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub min_length: Option<usize>,

    #[serde(default)]
    pub max_length: Option<usize>,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub email: bool,

    #[serde(default)]
    pub url: bool,

    #[serde(default)]
    pub min: Option<f64>,

    #[serde(default)]
    pub max: Option<f64>,

    /// Presentation only
    #[serde(default)]
    pub multiline: bool,

    #[serde(default)]
    pub success_message: Option<String>,

    /// Error overrides keyed by constraint name (`required`, `minLength`, ...)
    #[serde(default)]
    pub messages: BTreeMap<String, String>,

    /// Forwarded to the presenter untouched
    #[serde(default)]
    pub attrs: FieldAttrs,

    /// Per-field `blank` override
    #[serde(default)]
    pub blank: Option<formstate_rules::BlankPolicy>,
}

impl FieldConfig {
    pub fn constraints(&self) -> Vec<ConstraintSpec> {
        let flags = [
            (self.required, ConstraintSpec::Required),
            (self.email, ConstraintSpec::Email),
            (self.url, ConstraintSpec::Url),
        ];
        let [required, email, url] = flags.map(|(on, spec)| on.then_some(spec));

        [
            required,
            self.min_length.map(ConstraintSpec::MinLength),
            self.max_length.map(ConstraintSpec::MaxLength),
            self.pattern.clone().map(ConstraintSpec::Pattern),
            email,
            url,
            self.min.map(ConstraintSpec::Min),
            self.max.map(ConstraintSpec::Max),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Convert to a descriptor. Unknown message keys are rejected here.
    pub fn to_descriptor(&self) -> Result<FieldDescriptor, FormError> {
        let mut messages = Messages {
            success: self.success_message.clone(),
            ..Messages::default()
        };
        for (key, text) in &self.messages {
            let kind: ConstraintKind = key.parse()?;
            messages.errors.insert(kind, text.clone());
        }

        let mut descriptor = self
            .constraints()
            .into_iter()
            .fold(FieldDescriptor::new(&self.name), FieldDescriptor::constraint)
            .messages(messages)
            .attrs(self.attrs.clone());

        if self.multiline {
            descriptor = descriptor.multiline();
        }
        if let Some(blank) = self.blank {
            descriptor = descriptor.blank_policy(blank);
        }
        Ok(descriptor)
    }
}

impl FormConfig {
    /// Load a form definition from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form config: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse form config: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        // An empty file is a form with default options and no fields
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }

    /// Register every field, in file order, on a fresh form
    pub fn build(&self) -> Result<Form, FormError> {
        let mut form = Form::new(self.form);
        for field in &self.fields {
            form.register(field.to_descriptor()?)?;
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstate_rules::{BlankPolicy, ConfigError, EvaluationOrder};
    use pretty_assertions::assert_eq;

    const SIGNUP: &str = r#"
        [form]
        immediate = false
        blank = "strict"
        order = "required-first"

        [[fields]]
        name = "firstName"
        required = true
        successMessage = "Looks Good!"

        [fields.attrs]
        id = "firstName"
        class = "custom-class"
        data-custom = "5"

        [[fields]]
        name = "code"
        pattern = "\\d+"
        minLength = 4

        [fields.messages]
        pattern = "Digits only"

        [[fields]]
        name = "bio"
        multiline = true
    "#;

    #[test]
    fn test_empty_config() {
        let config = FormConfig::from_toml_str("").unwrap();
        assert!(config.form.immediate);
        assert!(config.fields.is_empty());
    }

    #[test]
    fn test_form_options_default_when_omitted() {
        let config = FormConfig::from_toml_str("[[fields]]\nname = \"a\"").unwrap();
        assert_eq!(config.form, FormOptions::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = FormConfig::from_toml_str(SIGNUP).unwrap();
        assert!(!config.form.immediate);
        assert_eq!(config.form.blank, BlankPolicy::Strict);
        assert_eq!(config.form.order, EvaluationOrder::RequiredFirst);
        assert_eq!(config.fields.len(), 3);
        assert_eq!(config.fields[0].attrs.get("data-custom"), Some("5"));
        assert!(config.fields[2].multiline);
    }

    #[test]
    fn test_flat_rules_use_canonical_order() {
        let config = FormConfig::from_toml_str(SIGNUP).unwrap();
        assert_eq!(
            config.fields[1].constraints(),
            vec![
                ConstraintSpec::MinLength(4),
                ConstraintSpec::Pattern(r"\d+".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_registers_fields_in_order() {
        let form = FormConfig::from_toml_str(SIGNUP).unwrap().build().unwrap();
        let names: Vec<&str> = form.fields().map(|f| f.name()).collect();
        assert_eq!(names, vec!["firstName", "code", "bio"]);

        let code = form.field(form.field_id("code").unwrap()).unwrap();
        assert_eq!(
            code.descriptor()
                .message_overrides()
                .errors
                .get(&ConstraintKind::Pattern)
                .map(String::as_str),
            Some("Digits only")
        );
    }

    #[test]
    fn test_build_fails_fast_on_bad_pattern() {
        let config = FormConfig::from_toml_str("[[fields]]\nname = \"a\"\npattern = \"[\"").unwrap();
        let err = config.build().unwrap_err();
        assert!(matches!(err, FormError::Config(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_unknown_message_key_is_rejected() {
        let config = FormConfig::from_toml_str(
            "[[fields]]\nname = \"a\"\n[fields.messages]\nminlength = \"x\"",
        )
        .unwrap();
        let err = config.build().unwrap_err();
        assert!(matches!(err, FormError::Config(ConfigError::UnknownConstraint(ref k)) if k == "minlength"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(FormConfig::from_toml_str("[[fields]\nname=").is_err());
    }
}
