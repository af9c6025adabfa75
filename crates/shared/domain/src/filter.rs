//! Table filter criteria.

use serde::{Deserialize, Serialize};

use crate::university::University;
use crate::user::User;

/// Active filter values of the user table.
///
/// Empty strings and `None` match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university: Option<University>,
}

impl FilterCriteria {
    /// Criteria that match every user
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = value.into();
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = value.into();
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = value.into();
        self
    }

    pub fn university(mut self, value: Option<University>) -> Self {
        self.university = value;
        self
    }

    /// True when no criterion is active
    pub fn is_empty(&self) -> bool {
        self.first_name.trim().is_empty()
            && self.last_name.trim().is_empty()
            && self.email.trim().is_empty()
            && self.university.is_none()
    }

    /// Check a user against every active criterion.
    ///
    /// Text criteria are trimmed and compared as case-insensitive
    /// substrings; the university must match exactly.
    pub fn matches(&self, user: &User) -> bool {
        contains_ignore_case(&user.first_name, &self.first_name)
            && contains_ignore_case(&user.last_name, &self.last_name)
            && contains_ignore_case(&user.email, &self.email)
            && self.university.map_or(true, |u| user.university == u)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty() || haystack.to_lowercase().contains(&needle)
}
