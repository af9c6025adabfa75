//! Registration Service Library
//!
//! Owns the registered users and implements the submit and delete flows on
//! top of the domain rules. The UI layer drives it one call at a time and
//! supplies the delete confirmation.

pub mod repository;
pub mod service;

pub use repository::RegistrationStore;
pub use service::{ConfirmPrompt, Confirmation, DeleteOutcome, RegistrationManager, RegistrationService};

use common::RegistrationConfig;

/// Build a service from configuration, starting with an empty store.
pub fn from_config(config: &RegistrationConfig) -> RegistrationManager {
    tracing::debug!(domains = ?config.allowed_domains, "Creating registration service");
    RegistrationManager::new(config.allowed_domains())
}
