//! Common utilities shared across the registration crates.
//!
//! This crate provides:
//! - Unified application error handling
//! - Configuration loaded from the environment
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::RegistrationConfig;
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::init_tracing;
