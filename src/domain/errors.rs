use crate::domain::value_objects::OrderId;
use std::fmt;
use thiserror::Error;

/// Dashboard error kinds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Missing/invalid creation fields, detected locally before any
    /// network call is made
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Transport failure or malformed response on list/detail fetch
    /// or creation
    #[error("order service error: {0}")]
    Retrieval(String),

    /// Detail fetch for an id the service does not recognize
    #[error("order not found: {0}")]
    NotFound(OrderId),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Retrieval(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Retrieval(format!("malformed response: {}", err))
    }
}

/// One inline form error, addressed to a single field.
#[derive(Debug, Clone, PartialEq)]
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

/// Collection of per-field validation errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// First error message for the given field, if any.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Dashboard result type.
pub type DashboardResult<T> = Result<T, DashboardError>;
