//! Registration form validation rules.
//!
//! Every field is checked on its own and all violations are collected, so a
//! single submission can report several problems at once. The duplicate
//! email check runs only once every per-field rule passes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use validator::{ValidateEmail, ValidateLength};

use crate::constants::{DEFAULT_ALLOWED_DOMAINS, EMAIL_DOMAIN_SEPARATOR, MIN_NAME_LENGTH};
use crate::university::University;
use crate::user::{normalize_email, Field, RegistrationCandidate, User};

/// Kind of rule a field value violated.
///
/// Declaration order is the priority used when only one message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationKind {
    RequiredFieldMissing,
    MinLengthViolation,
    InvalidEmailFormat,
    DomainNotAllowed,
    DuplicateEmail,
    UnknownUniversity,
}

impl ValidationKind {
    /// Message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            ValidationKind::RequiredFieldMissing => "This field is required",
            ValidationKind::MinLengthViolation => "Minimum length is 2 characters",
            ValidationKind::InvalidEmailFormat => "Please enter a valid email",
            ValidationKind::DomainNotAllowed => "Email domain not allowed",
            ValidationKind::DuplicateEmail => "This email is already registered.",
            ValidationKind::UnknownUniversity => "Please select a university from the list",
        }
    }
}

/// Per-field set of violated rules. A field without entries is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<Field, BTreeSet<ValidationKind>>,
}

impl ValidationReport {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for a field
    pub fn add(&mut self, field: Field, kind: ValidationKind) {
        self.errors.entry(field).or_default().insert(kind);
    }

    /// True when no field has a violation
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when the given field has no violation
    pub fn is_field_valid(&self, field: Field) -> bool {
        !self.errors.contains_key(&field)
    }

    /// Violations for a field, in priority order
    pub fn errors_for(&self, field: Field) -> impl Iterator<Item = ValidationKind> + '_ {
        self.errors.get(&field).into_iter().flatten().copied()
    }

    /// Check whether a field carries a specific violation
    pub fn has(&self, field: Field, kind: ValidationKind) -> bool {
        self.errors
            .get(&field)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// The single message the form displays for a field, if any
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.errors_for(field).next().map(|kind| kind.message())
    }

    /// Fields with at least one violation
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .fields()
            .filter_map(|field| {
                self.message_for(field)
                    .map(|message| format!("{}: {}", field, message))
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Closed set of email domains accepted at registration.
///
/// Entries are stored trimmed, lower-cased and without a leading `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedDomains {
    domains: Vec<String>,
}

impl AllowedDomains {
    /// Build an allow-list, normalising every entry and dropping blanks
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for domain in domains {
            let domain = domain
                .as_ref()
                .trim()
                .trim_start_matches(EMAIL_DOMAIN_SEPARATOR)
                .to_lowercase();
            if !domain.is_empty() && !normalized.contains(&domain) {
                normalized.push(domain);
            }
        }
        Self {
            domains: normalized,
        }
    }

    /// Check a domain (already lower-cased) against the list
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    /// Check the domain part of an email address.
    ///
    /// Values that are empty or contain no `@` pass: the required and
    /// format rules report those.
    pub fn permits(&self, email: &str) -> bool {
        let value = email.trim().to_lowercase();
        if value.is_empty() {
            return true;
        }
        match value.rfind(EMAIL_DOMAIN_SEPARATOR) {
            Some(at) => self.contains(&value[at + 1..]),
            None => true,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }
}

impl Default for AllowedDomains {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_DOMAINS)
    }
}

/// Validate a candidate against the allow-list and the registered users.
pub fn validate(
    candidate: &RegistrationCandidate,
    allowed: &AllowedDomains,
    existing: &[User],
) -> ValidationReport {
    let mut report = ValidationReport::new();

    check_name(&mut report, Field::FirstName, &candidate.first_name);
    check_name(&mut report, Field::LastName, &candidate.last_name);
    check_email(&mut report, &candidate.email, allowed);
    check_university(&mut report, &candidate.university);

    if report.is_valid() && is_email_taken(&candidate.email, existing) {
        report.add(Field::Email, ValidationKind::DuplicateEmail);
    }

    report
}

/// Check whether any existing user already owns the email
pub fn is_email_taken(email: &str, existing: &[User]) -> bool {
    let key = normalize_email(email);
    existing.iter().any(|user| user.email_key() == key)
}

fn check_name(report: &mut ValidationReport, field: Field, value: &str) {
    let value = value.trim().to_string();
    if value.is_empty() {
        report.add(field, ValidationKind::RequiredFieldMissing);
    } else if !value.validate_length(Some(MIN_NAME_LENGTH), None, None) {
        report.add(field, ValidationKind::MinLengthViolation);
    }
}

fn check_email(report: &mut ValidationReport, value: &str, allowed: &AllowedDomains) {
    let value = value.trim().to_string();
    if value.is_empty() {
        report.add(Field::Email, ValidationKind::RequiredFieldMissing);
        return;
    }
    if !value.validate_email() {
        report.add(Field::Email, ValidationKind::InvalidEmailFormat);
    }
    if !allowed.permits(&value) {
        report.add(Field::Email, ValidationKind::DomainNotAllowed);
    }
}

fn check_university(report: &mut ValidationReport, value: &str) {
    if value.trim().is_empty() {
        report.add(Field::University, ValidationKind::RequiredFieldMissing);
    } else if value.parse::<University>().is_err() {
        report.add(Field::University, ValidationKind::UnknownUniversity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(first: &str, last: &str, email: &str, university: &str) -> RegistrationCandidate {
        RegistrationCandidate::new(first, last, email, university)
    }

    #[test]
    fn test_valid_candidate_has_no_errors() {
        let report = validate(
            &candidate("John", "Doe", "john@edu.com", "MIT"),
            &AllowedDomains::default(),
            &[],
        );
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_whitespace_only_name_is_required() {
        let report = validate(
            &candidate("   ", "Doe", "john@edu.com", "MIT"),
            &AllowedDomains::default(),
            &[],
        );
        assert!(report.has(Field::FirstName, ValidationKind::RequiredFieldMissing));
        assert!(!report.has(Field::FirstName, ValidationKind::MinLengthViolation));
    }

    #[test]
    fn test_min_length_uses_trimmed_value() {
        let report = validate(
            &candidate(" J ", "Doe", "john@edu.com", "MIT"),
            &AllowedDomains::default(),
            &[],
        );
        assert!(report.has(Field::FirstName, ValidationKind::MinLengthViolation));

        let report = validate(
            &candidate("Jo", "Li", "john@edu.com", "MIT"),
            &AllowedDomains::default(),
            &[],
        );
        assert!(report.is_valid());
    }

    #[test]
    fn test_min_length_counts_characters() {
        // two characters, four bytes
        let report = validate(
            &candidate("Łó", "Doe", "john@edu.com", "MIT"),
            &AllowedDomains::default(),
            &[],
        );
        assert!(report.is_field_valid(Field::FirstName));

        let report = validate(
            &candidate("Ł", "Doe", "john@edu.com", "MIT"),
            &AllowedDomains::default(),
            &[],
        );
        assert!(report.has(Field::FirstName, ValidationKind::MinLengthViolation));
    }

    #[test]
    fn test_reports_errors_on_every_field() {
        let report = validate(
            &candidate("Jo", "D", "bad-email", ""),
            &AllowedDomains::default(),
            &[],
        );

        assert!(report.has(Field::University, ValidationKind::RequiredFieldMissing));
        assert!(report.has(Field::LastName, ValidationKind::MinLengthViolation));
        assert!(report.has(Field::Email, ValidationKind::InvalidEmailFormat));
        // no '@', so the domain rule stays silent
        assert!(!report.has(Field::Email, ValidationKind::DomainNotAllowed));
        assert!(report.is_field_valid(Field::FirstName));
        let fields: Vec<_> = report.fields().collect();
        assert_eq!(fields, vec![Field::LastName, Field::Email, Field::University]);
        assert_eq!(report.errors_for(Field::Email).count(), 1);
    }

    #[test]
    fn test_empty_email_only_required() {
        let report = validate(
            &candidate("John", "Doe", "  ", "MIT"),
            &AllowedDomains::default(),
            &[],
        );
        let kinds: Vec<_> = report.errors_for(Field::Email).collect();
        assert_eq!(kinds, vec![ValidationKind::RequiredFieldMissing]);
    }

    #[test]
    fn test_format_and_domain_reported_together() {
        for email in ["bad mail@gmail.com", "a@"] {
            let report = validate(
                &candidate("John", "Doe", email, "MIT"),
                &AllowedDomains::default(),
                &[],
            );
            let kinds: Vec<_> = report.errors_for(Field::Email).collect();
            assert_eq!(
                kinds,
                vec![ValidationKind::InvalidEmailFormat, ValidationKind::DomainNotAllowed],
                "{email}"
            );
            assert_eq!(report.message_for(Field::Email), Some("Please enter a valid email"));
        }
    }

    #[test]
    fn test_domain_not_allowed() {
        let report = validate(
            &candidate("John", "Doe", "user@gmail.com", "MIT"),
            &AllowedDomains::default(),
            &[],
        );
        assert!(report.has(Field::Email, ValidationKind::DomainNotAllowed));
        assert_eq!(report.message_for(Field::Email), Some("Email domain not allowed"));
    }

    #[test]
    fn test_domain_check_is_case_insensitive() {
        let report = validate(
            &candidate("John", "Doe", "John@University.EDU", "MIT"),
            &AllowedDomains::default(),
            &[],
        );
        assert!(report.is_valid());
    }

    #[test]
    fn test_domain_uses_last_at_sign() {
        let allowed = AllowedDomains::default();
        assert!(allowed.permits("a@gmail.com@edu.com"));
        assert!(!allowed.permits("a@edu.com@gmail.com"));
    }

    #[test]
    fn test_permits_skips_values_without_at() {
        let allowed = AllowedDomains::default();
        assert!(allowed.permits(""));
        assert!(allowed.permits("no-at-sign"));
    }

    #[test]
    fn test_allowed_domains_normalized() {
        let allowed = AllowedDomains::new(["@Campus.ORG", " school.edu ", "", "campus.org"]);
        let domains: Vec<_> = allowed.iter().collect();
        assert_eq!(domains, vec!["campus.org", "school.edu"]);
        assert!(allowed.permits("x@campus.org"));
    }

    #[test]
    fn test_duplicate_email_ignores_case_and_whitespace() {
        let existing = vec![User::new("A", "B", "A@EDU.COM", University::Mit)];
        let report = validate(
            &candidate("John", "Doe", "a@edu.com ", "MIT"),
            &AllowedDomains::default(),
            &existing,
        );
        assert!(report.has(Field::Email, ValidationKind::DuplicateEmail));
        assert_eq!(
            report.message_for(Field::Email),
            Some("This email is already registered.")
        );
    }

    #[test]
    fn test_duplicate_check_skipped_when_fields_invalid() {
        let existing = vec![User::new("A", "B", "a@edu.com", University::Mit)];
        let report = validate(
            &candidate("J", "Doe", "a@edu.com", "MIT"),
            &AllowedDomains::default(),
            &existing,
        );
        assert!(!report.has(Field::Email, ValidationKind::DuplicateEmail));
        assert!(report.has(Field::FirstName, ValidationKind::MinLengthViolation));
    }

    #[test]
    fn test_unknown_university() {
        let report = validate(
            &candidate("John", "Doe", "john@edu.com", "Atlantis Tech"),
            &AllowedDomains::default(),
            &[],
        );
        assert!(report.has(Field::University, ValidationKind::UnknownUniversity));
    }

    #[test]
    fn test_whitespace_only_university_is_required() {
        let report = validate(
            &candidate("John", "Doe", "john@edu.com", "  "),
            &AllowedDomains::default(),
            &[],
        );
        let kinds: Vec<_> = report.errors_for(Field::University).collect();
        assert_eq!(kinds, vec![ValidationKind::RequiredFieldMissing]);
    }

    #[test]
    fn test_message_priority() {
        let mut report = ValidationReport::new();
        report.add(Field::Email, ValidationKind::DomainNotAllowed);
        report.add(Field::Email, ValidationKind::InvalidEmailFormat);
        assert_eq!(report.message_for(Field::Email), Some("Please enter a valid email"));
        assert_eq!(report.message_for(Field::FirstName), None);
    }

    #[test]
    fn test_display_lists_field_messages() {
        let mut report = ValidationReport::new();
        report.add(Field::LastName, ValidationKind::MinLengthViolation);
        report.add(Field::University, ValidationKind::RequiredFieldMissing);
        assert_eq!(
            report.to_string(),
            "Last name: Minimum length is 2 characters, University: This field is required"
        );
    }

    #[test]
    fn test_report_serializes_by_field() {
        let mut report = ValidationReport::new();
        report.add(Field::Email, ValidationKind::DuplicateEmail);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"email":["duplicateEmail"]}"#);
    }
}
