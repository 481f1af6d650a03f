//! # formstate
//!
//! Tracks validity and feedback messages for every field of a form.
//!
//! Fields are registered explicitly, events (change, blur, submit) are fed
//! in by the rendering layer, and the form answers two questions: what should
//! each field currently show, and may the form be submitted.
//!
//! ## Example
//!
//! ```
//! use formstate::{FieldDescriptor, Form, FormOptions, Validity};
//!
//! let mut form = Form::new(FormOptions::default());
//! let name = form
//!     .register(FieldDescriptor::new("firstName").required().success_message("Looks Good!"))
//!     .unwrap();
//!
//! let state = form.change(name, "test").unwrap();
//! assert_eq!(state.validity(), Validity::Valid);
//! assert_eq!(state.message(), Some("Looks Good!"));
//!
//! assert!(form.submit().is_submitted());
//! ```
//!
//! ## Modules
//!
//! - [`field`] - descriptors and the per-field state machine
//! - [`state`] - the observable field state
//! - [`form`] - registration, event ingestion and submission gating
//! - [`config`] - declarative form definitions loaded from TOML
//! - [`event`] - serializable events for replaying interaction scripts
//! - [`attrs`] - pass-through attributes the core never inspects

pub mod attrs;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod form;
pub mod state;

pub use attrs::FieldAttrs;
pub use config::{FieldConfig, FormConfig};
pub use error::FormError;
pub use event::{DispatchResult, FormEvent};
pub use field::{Field, FieldDescriptor, FieldId};
pub use form::{Form, FormOptions, FormSnapshot, FormValues, SubmitOutcome};
pub use state::{FieldState, Validity};

// Re-export the rule layer so callers need a single dependency
pub use formstate_rules as rules;
pub use formstate_rules::{BlankPolicy, ConfigError, ConstraintKind, ConstraintSpec, EvaluationOrder};
