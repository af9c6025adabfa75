//! Domain layer - Registration entities, validation and filtering rules.
//!
//! This crate contains pure domain logic with no I/O and no logging.
//! The store and the flows built on top of it live in the service crate.

pub mod constants;
pub mod error;
pub mod filter;
pub mod university;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use filter::FilterCriteria;
pub use university::{university_options, UniversityOption, University, UnknownUniversity};
pub use user::{normalize_email, Field, RegistrationCandidate, User};
pub use validation::{validate, AllowedDomains, ValidationKind, ValidationReport};
