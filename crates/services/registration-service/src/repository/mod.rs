//! Repository layer for registered users.

mod registration_store;

pub use registration_store::RegistrationStore;
