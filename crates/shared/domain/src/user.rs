//! User domain entity and related types.

use serde::{Deserialize, Serialize};

use crate::university::University;

/// Registered user.
///
/// Text fields are stored trimmed. A user is never mutated after
/// registration; it only leaves the store through deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university: University,
}

impl User {
    /// Create a new user
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        university: University,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            university,
        }
    }

    /// Email in the form used for uniqueness checks
    pub fn email_key(&self) -> String {
        normalize_email(&self.email)
    }

    /// Check whether this user owns the given email (trimmed, case-insensitive)
    pub fn has_email(&self, email: &str) -> bool {
        self.email_key() == normalize_email(email)
    }
}

/// Trim and lower-case an email address for comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Form fields of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    University,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 4] = [Field::FirstName, Field::LastName, Field::Email, Field::University];

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Email => "Email",
            Field::University => "University",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw registration form values, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university: String,
}

impl RegistrationCandidate {
    /// Create a candidate from raw field values
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        university: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            university: university.into(),
        }
    }

    /// Convert into a stored user.
    ///
    /// Returns `None` when the university does not parse; callers run
    /// validation first, so this only guards the type conversion.
    pub fn into_user(self) -> Option<User> {
        let university = self.university.parse().ok()?;
        Some(User {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            university,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_email_ignores_case_and_whitespace() {
        let user = User::new("John", "Doe", "A@EDU.COM", University::Mit);
        assert!(user.has_email("a@edu.com "));
        assert!(user.has_email("  a@Edu.Com"));
        assert!(!user.has_email("b@edu.com"));
    }

    #[test]
    fn test_into_user_trims_fields() {
        let candidate = RegistrationCandidate::new(" John ", "Doe ", " john@edu.com", "MIT");
        let user = candidate.into_user().unwrap();

        assert_eq!(user.first_name, "John");
        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.email, "john@edu.com");
        assert_eq!(user.university, University::Mit);
    }

    #[test]
    fn test_into_user_rejects_unknown_university() {
        let candidate = RegistrationCandidate::new("John", "Doe", "john@edu.com", "Nowhere");
        assert!(candidate.into_user().is_none());
    }

    #[test]
    fn test_field_serializes_camel_case() {
        let json = serde_json::to_string(&Field::FirstName).unwrap();
        assert_eq!(json, "\"firstName\"");
    }
}
