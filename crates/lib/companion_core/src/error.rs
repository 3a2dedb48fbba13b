//! Client-side validation errors.

use thiserror::Error;

/// Ad hoc input validation failures raised before a request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Event must not end before it starts")]
    EndsBeforeStart,

    #[error("Unknown module kind: {0}")]
    UnknownKind(String),

    #[error("Unknown field '{field}' for module kind '{kind}'")]
    UnknownField { kind: String, field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
