use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A single field-level complaint, either produced by local validation or
/// echoed back from the payments processor's rejection of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not acceptable: {0}")]
    NotAcceptable(String),
    #[error("validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation(vec![FieldError::new(field, message)])
    }

    /// Machine-readable category for administrative API responses.
    pub fn category(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::NotAcceptable(_) => "not_acceptable",
            Error::Validation(_) => "validation_failure",
            Error::Storage(_) | Error::Internal(_) => "internal_failure",
        }
    }
}

/// Structured body returned to tenant-admin callers. End users never see the
/// processor's raw error text; it only flows back to the admin who initiated
/// the offending request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub category: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        let errors = match err {
            Error::Validation(fields) => fields.clone(),
            _ => Vec::new(),
        };
        Self {
            category: err.category(),
            message: err.to_string(),
            errors,
        }
    }
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}
