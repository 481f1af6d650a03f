use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use formstate::{DispatchResult, FieldState, Form, FormConfig, FormEvent, SubmitOutcome, Validity};
use serde::Serialize;

use crate::render;
use crate::OutputFormat;

#[derive(Serialize)]
struct FieldReport<'a> {
    name: &'a str,
    #[serde(flatten)]
    state: &'a FieldState,
}

#[derive(Serialize)]
struct Report<'a> {
    valid: bool,
    fields: Vec<FieldReport<'a>>,
    submit: Option<&'a SubmitOutcome>,
}

/// Returns the form's aggregate validity after the script has run
pub fn execute(config: &Path, events: Option<&Path>, format: OutputFormat) -> Result<bool> {
    let mut form = FormConfig::load(config)?
        .build()
        .with_context(|| format!("Invalid form definition: {:?}", config))?;

    let script = match events {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read event script: {:?}", path))?;
            FormEvent::parse_script(&content)
                .with_context(|| format!("Failed to parse event script: {:?}", path))?
        }
        None => vec![FormEvent::Submit],
    };

    let submit = replay(&mut form, &script)?;

    match format {
        OutputFormat::Text => print_text(&form, submit.as_ref()),
        OutputFormat::Json => {
            let report = Report {
                valid: form.is_valid(),
                fields: form
                    .fields()
                    .map(|f| FieldReport {
                        name: f.name(),
                        state: f.state(),
                    })
                    .collect(),
                submit: submit.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Html => println!("{}", render::render_form(&form).into_string()),
    }

    Ok(form.is_valid())
}

/// Dispatch every event, keeping the outcome of the last submit
fn replay(form: &mut Form, script: &[FormEvent]) -> Result<Option<SubmitOutcome>> {
    let mut last_submit = None;
    for (index, event) in script.iter().enumerate() {
        let result = form
            .dispatch(event)
            .with_context(|| format!("Event {} could not be applied", index + 1))?;
        if let DispatchResult::Submit(outcome) = result {
            last_submit = Some(outcome);
        }
    }
    Ok(last_submit)
}

fn print_text(form: &Form, submit: Option<&SubmitOutcome>) {
    for field in form.fields() {
        let state = field.state();
        let validity = match state.validity() {
            Validity::Valid => "valid".green(),
            Validity::Invalid => "invalid".red(),
            Validity::Unvalidated => "unvalidated".dimmed(),
        };
        println!(
            "{} {} {}",
            field.name().bold(),
            validity,
            state.message().unwrap_or_default()
        );
    }

    println!();
    match submit {
        Some(SubmitOutcome::Submitted { values }) => {
            println!("{} ({} fields)", "Submitted".green().bold(), values.len());
        }
        Some(SubmitOutcome::Blocked { invalid }) => {
            println!("{} by {}", "Blocked".red().bold(), invalid.join(", "));
        }
        None => println!("{}", "Not submitted".yellow()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIGNUP: &str = include_str!("../../forms/signup.toml");
    const EVENTS: &str = include_str!("../../forms/signup-events.json");

    #[test]
    fn test_replay_bundled_signup_script() {
        let mut form = FormConfig::from_toml_str(SIGNUP).unwrap().build().unwrap();
        let script = FormEvent::parse_script(EVENTS).unwrap();

        let outcome = replay(&mut form, &script).unwrap();
        assert_eq!(
            outcome,
            Some(SubmitOutcome::Blocked {
                invalid: vec!["firstName".to_string(), "code".to_string()]
            })
        );

        let code = form.field(form.field_id("code").unwrap()).unwrap();
        assert_eq!(code.state().message(), Some("Digits only"));
    }

    #[test]
    fn test_replay_reports_failing_event() {
        let mut form = FormConfig::from_toml_str(SIGNUP).unwrap().build().unwrap();
        let err = replay(&mut form, &[FormEvent::blur("missing")]).unwrap_err();
        assert_eq!(err.to_string(), "Event 1 could not be applied");
    }
}
