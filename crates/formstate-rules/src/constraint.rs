// File: src/constraint.rs
// Purpose: Constraint kinds, declared specs and their compiled form

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of a constraint, independent of its parameter.
///
/// The camelCase name doubles as the message-table key and as the
/// placeholder name inside default templates (`{minLength}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Email,
    Url,
    Min,
    Max,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 8] = [
        ConstraintKind::Required,
        ConstraintKind::MinLength,
        ConstraintKind::MaxLength,
        ConstraintKind::Pattern,
        ConstraintKind::Email,
        ConstraintKind::Url,
        ConstraintKind::Min,
        ConstraintKind::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Required => "required",
            ConstraintKind::MinLength => "minLength",
            ConstraintKind::MaxLength => "maxLength",
            ConstraintKind::Pattern => "pattern",
            ConstraintKind::Email => "email",
            ConstraintKind::Url => "url",
            ConstraintKind::Min => "min",
            ConstraintKind::Max => "max",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstraintKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownConstraint(s.to_string()))
    }
}

/// A constraint as the caller declares it, before compilation.
///
/// Serializes externally tagged: `"required"`, `{"minLength": 4}`,
/// `{"pattern": "\\d+"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintSpec {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(String),
    Email,
    Url,
    Min(f64),
    Max(f64),
}

impl ConstraintSpec {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            ConstraintSpec::Required => ConstraintKind::Required,
            ConstraintSpec::MinLength(_) => ConstraintKind::MinLength,
            ConstraintSpec::MaxLength(_) => ConstraintKind::MaxLength,
            ConstraintSpec::Pattern(_) => ConstraintKind::Pattern,
            ConstraintSpec::Email => ConstraintKind::Email,
            ConstraintSpec::Url => ConstraintKind::Url,
            ConstraintSpec::Min(_) => ConstraintKind::Min,
            ConstraintSpec::Max(_) => ConstraintKind::Max,
        }
    }

    /// Compile into an evaluable constraint.
    ///
    /// Only pattern syntax can fail here.
    pub fn compile(&self) -> Result<Constraint, ConfigError> {
        Ok(match self {
            ConstraintSpec::Required => Constraint::Required,
            ConstraintSpec::MinLength(n) => Constraint::MinLength(*n),
            ConstraintSpec::MaxLength(n) => Constraint::MaxLength(*n),
            ConstraintSpec::Pattern(source) => Constraint::Pattern(Pattern::new(source)?),
            ConstraintSpec::Email => Constraint::Email,
            ConstraintSpec::Url => Constraint::Url,
            ConstraintSpec::Min(n) => Constraint::Min(*n),
            ConstraintSpec::Max(n) => Constraint::Max(*n),
        })
    }
}

/// A regular expression that must match the whole value.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, ConfigError> {
        let invalid = |e| ConfigError::InvalidPattern {
            pattern: source.to_string(),
            source: e,
        };

        // The bare source must parse on its own; wrapping can rebalance
        // stray parentheses like `1)|(2`.
        Regex::new(source).map_err(invalid)?;
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(invalid)?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The expression as written, without the anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// A compiled constraint, ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Pattern),
    Email,
    Url,
    Min(f64),
    Max(f64),
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Required => ConstraintKind::Required,
            Constraint::MinLength(_) => ConstraintKind::MinLength,
            Constraint::MaxLength(_) => ConstraintKind::MaxLength,
            Constraint::Pattern(_) => ConstraintKind::Pattern,
            Constraint::Email => ConstraintKind::Email,
            Constraint::Url => ConstraintKind::Url,
            Constraint::Min(_) => ConstraintKind::Min,
            Constraint::Max(_) => ConstraintKind::Max,
        }
    }

    /// The declared form of this constraint.
    pub fn spec(&self) -> ConstraintSpec {
        match self {
            Constraint::Required => ConstraintSpec::Required,
            Constraint::MinLength(n) => ConstraintSpec::MinLength(*n),
            Constraint::MaxLength(n) => ConstraintSpec::MaxLength(*n),
            Constraint::Pattern(p) => ConstraintSpec::Pattern(p.as_str().to_string()),
            Constraint::Email => ConstraintSpec::Email,
            Constraint::Url => ConstraintSpec::Url,
            Constraint::Min(n) => ConstraintSpec::Min(*n),
            Constraint::Max(n) => ConstraintSpec::Max(*n),
        }
    }

    /// Named values available to message templates.
    pub fn placeholders(&self) -> Vec<(&'static str, String)> {
        let name = self.kind().as_str();
        match self {
            Constraint::MinLength(n) | Constraint::MaxLength(n) => vec![(name, n.to_string())],
            Constraint::Pattern(p) => vec![(name, p.as_str().to_string())],
            Constraint::Min(n) | Constraint::Max(n) => vec![(name, format_number(*n))],
            Constraint::Required | Constraint::Email | Constraint::Url => Vec::new(),
        }
    }
}

// Whole numbers print without the trailing `.0`
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in ConstraintKind::ALL {
            assert_eq!(kind.as_str().parse::<ConstraintKind>().unwrap(), kind);
        }
        assert!("minlength".parse::<ConstraintKind>().is_err());
    }

    #[test]
    fn test_pattern_is_anchored() {
        let pattern = Pattern::new(r"\d+").unwrap();
        assert!(pattern.is_full_match("1234"));
        assert!(!pattern.is_full_match("abcd"));
        assert!(!pattern.is_full_match("12ab"));
        assert_eq!(pattern.as_str(), r"\d+");
    }

    #[test]
    fn test_pattern_alternation_is_anchored_as_a_group() {
        let pattern = Pattern::new("cat|dog").unwrap();
        assert!(pattern.is_full_match("dog"));
        assert!(!pattern.is_full_match("hotdog"));
    }

    #[test]
    fn test_invalid_pattern_fails_to_compile() {
        let err = ConstraintSpec::Pattern("(unclosed".to_string())
            .compile()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_unbalanced_groups_are_rejected_before_anchoring() {
        let err = ConstraintSpec::Pattern("1)|(2".to_string())
            .compile()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "1)|(2"));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            Constraint::MinLength(4).placeholders(),
            vec![("minLength", "4".to_string())]
        );
        assert_eq!(Constraint::Min(18.0).placeholders(), vec![("min", "18".to_string())]);
        assert_eq!(Constraint::Max(2.5).placeholders(), vec![("max", "2.5".to_string())]);
        assert!(Constraint::Required.placeholders().is_empty());
    }

    #[test]
    fn test_spec_serde_shape() {
        let specs = vec![ConstraintSpec::Required, ConstraintSpec::MinLength(4)];
        let json = serde_json::to_string(&specs).unwrap();
        assert_eq!(json, r#"["required",{"minLength":4}]"#);

        let parsed: Vec<ConstraintSpec> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, specs);
    }

    #[test]
    fn test_spec_survives_compile() {
        let spec = ConstraintSpec::Pattern("[a-z]+".to_string());
        assert_eq!(spec.compile().unwrap().spec(), spec);
    }
}
