//! Unified application error handling.
//!
//! Wraps domain errors and the I/O failures of the terminal front-end in a
//! single type with stable codes and user-facing messages.

use domain::{DomainError, ValidationReport};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(ValidationReport),

    // Configuration
    #[error("Configuration error: {0}")]
    Config(String),

    // External errors
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Serialization error")]
    Json(#[from] serde_json::Error),
}

/// Error body printed in machine-readable output
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<ValidationReport>,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(report) => report.to_string(),
            AppError::Conflict(msg) => {
                if msg.ends_with("already exists") {
                    msg.clone()
                } else {
                    format!("{} already exists", msg)
                }
            }
            AppError::Config(msg) => format!("Configuration error: {}", msg),

            // Hide details for internal errors
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                "An I/O error occurred".to_string()
            }
            AppError::Json(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "Failed to encode output".to_string()
            }

            // Use default message for others
            AppError::NotFound => self.to_string(),
        }
    }

    /// Structured body for JSON output
    pub fn to_response(&self) -> ErrorResponse {
        let fields = match self {
            AppError::Validation(report) => Some(report.clone()),
            _ => None,
        };
        ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                fields,
            },
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(report) => AppError::Validation(report),
            DomainError::DuplicateEmail(email) => AppError::Conflict(format!("Email {}", email)),
            DomainError::IndexOutOfRange { .. } => AppError::NotFound,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }
}
