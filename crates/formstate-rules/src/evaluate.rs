// File: src/evaluate.rs
// Purpose: Pure constraint evaluation with first-failure-wins ordering

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constraint::Constraint;

// Email validation regex
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

// URL validation regex
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url regex is valid")
});

/// Result of checking one value against one constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn is_pass(self) -> bool {
        self == Outcome::Pass
    }

    fn from_bool(pass: bool) -> Self {
        if pass {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

/// How `required` treats whitespace-only input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlankPolicy {
    /// Whitespace-only counts as empty
    #[default]
    Trim,
    /// Only the empty string counts as empty
    Strict,
}

/// Order in which a field's constraints are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationOrder {
    #[default]
    Declaration,
    /// `required` before anything else, the rest in declaration order
    RequiredFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalOptions {
    pub blank: BlankPolicy,
    pub order: EvaluationOrder,
}

/// Check `value` against a single constraint.
pub fn evaluate(value: &str, constraint: &Constraint, options: &EvalOptions) -> Outcome {
    let pass = match constraint {
        Constraint::Required => match options.blank {
            BlankPolicy::Trim => !value.trim().is_empty(),
            BlankPolicy::Strict => !value.is_empty(),
        },
        Constraint::MinLength(min) => value.chars().count() >= *min,
        Constraint::MaxLength(max) => value.chars().count() <= *max,
        Constraint::Pattern(pattern) => pattern.is_full_match(value),
        Constraint::Email => EMAIL_REGEX.is_match(value),
        Constraint::Url => URL_REGEX.is_match(value),
        Constraint::Min(min) => parse_number(value).is_some_and(|n| n >= *min),
        Constraint::Max(max) => parse_number(value).is_some_and(|n| n <= *max),
    };

    let outcome = Outcome::from_bool(pass);
    tracing::trace!(constraint = %constraint.kind(), ?outcome, "evaluated constraint");
    outcome
}

/// Evaluate constraints in order and return the first one that fails.
///
/// Later constraints are not visited once one fails.
pub fn first_failure<'a>(
    value: &str,
    constraints: &'a [Constraint],
    options: &EvalOptions,
) -> Option<&'a Constraint> {
    let fails = |c: &&'a Constraint| !evaluate(value, c, options).is_pass();

    match options.order {
        EvaluationOrder::Declaration => constraints.iter().find(fails),
        EvaluationOrder::RequiredFirst => constraints
            .iter()
            .filter(|c| matches!(c, Constraint::Required))
            .chain(constraints.iter().filter(|c| !matches!(c, Constraint::Required)))
            .find(fails),
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
