//! formstate rules
//!
//! Pure constraint evaluation and message resolution. Nothing in this crate
//! holds state: a value and a list of constraints go in, the first failing
//! constraint (if any) and its display text come out.
//!
//! ```
//! use formstate_rules::{first_failure, resolve_error, ConstraintSpec, EvalOptions, Messages};
//!
//! let constraints = vec![
//!     ConstraintSpec::MinLength(4).compile().unwrap(),
//!     ConstraintSpec::Pattern(r"\d+".to_string()).compile().unwrap(),
//! ];
//!
//! let failing = first_failure("a", &constraints, &EvalOptions::default()).unwrap();
//! assert_eq!(
//!     resolve_error(&Messages::default(), failing),
//!     "Enter at least 4 characters"
//! );
//! ```

pub mod constraint;
pub mod error;
pub mod evaluate;
pub mod messages;

pub use constraint::{Constraint, ConstraintKind, ConstraintSpec, Pattern};
pub use error::ConfigError;
pub use evaluate::{evaluate, first_failure, BlankPolicy, EvalOptions, EvaluationOrder, Outcome};
pub use messages::{default_template, interpolate, resolve_error, resolve_success, Messages};
