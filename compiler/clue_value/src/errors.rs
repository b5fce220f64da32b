//! Error types for synthesis and for calls into synthesized behaviors.
//!
//! # Categories
//!
//! - [`SynthesisError`]: a rule could not produce an artifact for a class.
//!   Fatal for the triggering access; nothing is cached, so the next access
//!   retries from scratch.
//! - [`EvalError`]: a call-time failure. Synthesis failures surface through
//!   [`EvalError::Synthesis`] unchanged.
//!
//! Names are resolved to text when the error is built so errors can outlive
//! the interner borrow and print without one.

use thiserror::Error;

use crate::Value;

/// Result of calling a method.
pub type EvalResult = Result<Value, EvalError>;

/// Failure to build an artifact from a class's clue set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// A parameter without a default would follow one with a default.
    #[error("{class}.{behavior}: non-default field '{field}' follows a defaulted field")]
    NonDefaultAfterDefault {
        class: String,
        behavior: String,
        field: String,
    },

    /// A clue name cannot be used as a parameter or attribute name.
    #[error("{class}.{behavior}: '{field}' is not a valid field name")]
    InvalidFieldName {
        class: String,
        behavior: String,
        field: String,
    },

    /// A rule refused to synthesize for this class.
    #[error("{class}.{behavior}: {reason}")]
    Rejected {
        class: String,
        behavior: String,
        reason: String,
    },
}

/// Call-time error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("{class}() missing required argument: '{name}'")]
    MissingArgument { class: String, name: String },

    #[error("{class}() takes {expected} positional arguments but {got} were given")]
    TooManyPositional {
        class: String,
        expected: usize,
        got: usize,
    },

    #[error("{class}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword { class: String, name: String },

    #[error("{class}() got multiple values for argument '{name}'")]
    DuplicateArgument { class: String, name: String },

    #[error("{class}() takes no arguments ({got} given)")]
    NoConstructorArgs { class: String, got: usize },

    #[error("'{method}' expects {expected} argument(s), got {got}")]
    WrongArgCount {
        method: String,
        expected: usize,
        got: usize,
    },

    #[error("'{class}' object has no attribute '{field}'")]
    UndefinedField { class: String, field: String },

    #[error("'{class}' object has fixed storage; cannot assign '{field}'")]
    NoSuchSlot { class: String, field: String },

    #[error("'{type_name}' has no method '{method}'")]
    UndefinedMethod { type_name: String, method: String },

    #[error("unhashable type: '{type_name}'")]
    Unhashable { type_name: String },

    #[error("'{type_name}' object is not iterable")]
    NotIterable { type_name: String },

    #[error("expected a record, got '{type_name}'")]
    NotARecord { type_name: String },

    #[error("'{method}' returned {got}, expected {expected}")]
    InvalidReturn {
        method: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("{class}() accepts {expected} positional sub-patterns ({got} given)")]
    TooManySubpatterns {
        class: String,
        expected: usize,
        got: usize,
    },

    #[error("unknown class {0}")]
    UnknownClass(String),
}
