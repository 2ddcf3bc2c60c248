use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FormField;

/// Body returned by the prediction service alongside a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// The server-provided message, if it carried a non-empty one.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViolationKind {
    #[error("is required")]
    Missing,
    #[error("must be one of the listed options")]
    NotAnOption,
    #[error("must be a number")]
    NotANumber,
    #[error("must be a whole number")]
    NotAWholeNumber,
    #[error("must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
}

/// A field whose current value would be rejected by the form's input constraints.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}: {kind}", .field.label())]
pub struct FieldViolation {
    pub field: FormField,
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn new(field: FormField, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}
