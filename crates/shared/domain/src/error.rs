//! Domain-level errors.
//!
//! These errors represent business rule violations. They carry structured
//! data and are independent of how the caller presents them.

use thiserror::Error;

use crate::validation::ValidationReport;

/// Domain-specific errors for registration rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more form fields failed validation
    #[error("Validation error: {0}")]
    Validation(ValidationReport),

    /// A user with the same email is already registered
    #[error("Email {0} is already registered")]
    DuplicateEmail(String),

    /// Delete request for a row that does not exist
    #[error("Index {index} out of range for {len} users")]
    IndexOutOfRange { index: i64, len: usize },
}

impl DomainError {
    /// Create a duplicate email error
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        DomainError::DuplicateEmail(email.into())
    }

    /// Validation report carried by the error, if any
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            DomainError::Validation(report) => Some(report),
            _ => None,
        }
    }
}

impl From<ValidationReport> for DomainError {
    fn from(report: ValidationReport) -> Self {
        DomainError::Validation(report)
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
