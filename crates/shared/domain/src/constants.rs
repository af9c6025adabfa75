//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Email Domains
// =============================================================================

/// Email domains accepted when no allow-list is configured
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &["edu.com", "university.edu"];

/// Separator between local part and domain of an email address
pub const EMAIL_DOMAIN_SEPARATOR: char = '@';

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length requirement (characters, after trimming)
pub const MIN_NAME_LENGTH: u64 = 2;

// =============================================================================
// Universities
// =============================================================================

/// Label of the selection entry that clears the university filter
pub const ALL_UNIVERSITIES_LABEL: &str = "All Universities";

// =============================================================================
// Delete Confirmation
// =============================================================================

/// Header shown on the delete confirmation prompt
pub const CONFIRM_DELETE_HEADER: &str = "Confirm";

/// Message shown on the delete confirmation prompt
pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this user?";
