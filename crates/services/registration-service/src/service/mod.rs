//! Service layer - registration use cases.

mod confirmation;
mod registration_service;

pub use confirmation::{ConfirmPrompt, Confirmation};
#[cfg(any(test, feature = "test-utils"))]
pub use confirmation::MockConfirmation;
pub use registration_service::{DeleteOutcome, RegistrationManager, RegistrationService};
