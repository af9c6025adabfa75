//! Registration service - submit and delete flows over the store.
//!
//! The service owns the store; nothing else mutates it.

use domain::{
    validate, AllowedDomains, DomainError, DomainResult, Field, FilterCriteria,
    RegistrationCandidate, UniversityOption, User, ValidationKind, ValidationReport,
};
use tracing::{debug, info, warn};

use super::confirmation::{ConfirmPrompt, Confirmation};
use crate::repository::RegistrationStore;

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user was removed from the store
    Removed(User),
    /// The confirmation prompt was declined
    Declined,
    /// The index named no user; nothing happened
    Ignored,
}

/// Registration use cases.
pub trait RegistrationService {
    /// Validate a candidate without submitting it
    fn check(&self, candidate: &RegistrationCandidate) -> ValidationReport;

    /// Validate and register a candidate
    fn submit(&mut self, candidate: RegistrationCandidate) -> DomainResult<User>;

    /// Ask for confirmation, then delete the user at `index`
    fn request_delete(&mut self, index: i64, confirmation: &dyn Confirmation) -> DeleteOutcome;

    /// Users matching the criteria, in insertion order
    fn query<'a>(
        &'a self,
        criteria: &'a FilterCriteria,
    ) -> impl Iterator<Item = &'a User> + Clone + 'a;

    /// Every registered user
    fn users(&self) -> &[User];

    /// University selection entries
    fn university_options(&self) -> &'static [UniversityOption];
}

/// Concrete implementation of RegistrationService backed by an owned store.
#[derive(Debug, Clone, Default)]
pub struct RegistrationManager {
    store: RegistrationStore,
    allowed: AllowedDomains,
}

impl RegistrationManager {
    /// Create a service with an empty store
    pub fn new(allowed: AllowedDomains) -> Self {
        Self::with_store(RegistrationStore::new(), allowed)
    }

    /// Create a service over an existing store
    pub fn with_store(store: RegistrationStore, allowed: AllowedDomains) -> Self {
        Self { store, allowed }
    }
}

impl RegistrationService for RegistrationManager {
    fn check(&self, candidate: &RegistrationCandidate) -> ValidationReport {
        validate(candidate, &self.allowed, self.store.users())
    }

    fn submit(&mut self, candidate: RegistrationCandidate) -> DomainResult<User> {
        let report = self.check(&candidate);
        if !report.is_valid() {
            warn!(fields = %report, "Registration rejected");
            return Err(DomainError::Validation(report));
        }

        let Some(user) = candidate.into_user() else {
            let mut report = ValidationReport::new();
            report.add(Field::University, ValidationKind::UnknownUniversity);
            return Err(DomainError::Validation(report));
        };

        if let Err(e) = self.store.add(user.clone()) {
            warn!(error = %e, "Registration rejected by store");
            return Err(e);
        }

        info!(
            email = %user.email,
            university = %user.university,
            total = self.store.len(),
            "User registered"
        );
        Ok(user)
    }

    fn request_delete(&mut self, index: i64, confirmation: &dyn Confirmation) -> DeleteOutcome {
        let Some(user) = self.store.get(index).cloned() else {
            debug!(index, len = self.store.len(), "Delete request ignored");
            return DeleteOutcome::Ignored;
        };

        if !confirmation.confirm(&ConfirmPrompt::delete(user)) {
            debug!(index, "Delete declined");
            return DeleteOutcome::Declined;
        }

        match self.store.remove(index) {
            Ok(removed) => {
                info!(email = %removed.email, total = self.store.len(), "User deleted");
                DeleteOutcome::Removed(removed)
            }
            Err(e) => {
                debug!(error = %e, "Delete request ignored");
                DeleteOutcome::Ignored
            }
        }
    }

    fn query<'a>(
        &'a self,
        criteria: &'a FilterCriteria,
    ) -> impl Iterator<Item = &'a User> + Clone + 'a {
        debug!(?criteria, "Querying users");
        self.store.query(criteria)
    }

    fn users(&self) -> &[User] {
        self.store.users()
    }

    fn university_options(&self) -> &'static [UniversityOption] {
        self.store.university_options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockConfirmation;
    use domain::University;

    fn manager() -> RegistrationManager {
        RegistrationManager::new(AllowedDomains::default())
    }

    fn john() -> RegistrationCandidate {
        RegistrationCandidate::new("John", "Doe", "john@edu.com", "MIT")
    }

    #[test]
    fn test_submit_registers_user() {
        let mut service = manager();
        let user = service.submit(john()).unwrap();

        assert_eq!(user.university, University::Mit);
        assert_eq!(service.users(), &[user]);
    }

    #[test]
    fn test_submit_rejects_duplicate_email() {
        let mut service = manager();
        service.submit(john()).unwrap();

        let err = service
            .submit(RegistrationCandidate::new(
                "Jane",
                "Doe",
                "john@edu.com",
                "Harvard University",
            ))
            .unwrap_err();

        let report = err.report().unwrap();
        assert!(report.has(Field::Email, ValidationKind::DuplicateEmail));
        assert_eq!(service.users().len(), 1);
    }

    #[test]
    fn test_submit_invalid_leaves_store_untouched() {
        let mut service = manager();
        let err = service
            .submit(RegistrationCandidate::new("Jo", "D", "bad-email", ""))
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(service.users().is_empty());
    }

    #[test]
    fn test_request_delete_accepted() {
        let mut service = manager();
        service.submit(john()).unwrap();

        let mut confirmation = MockConfirmation::new();
        confirmation
            .expect_confirm()
            .withf(|prompt| {
                prompt.header == "Confirm"
                    && prompt.message == "Are you sure you want to delete this user?"
                    && prompt.user.email == "john@edu.com"
            })
            .times(1)
            .return_const(true);

        let outcome = service.request_delete(0, &confirmation);

        assert!(matches!(outcome, DeleteOutcome::Removed(ref u) if u.first_name == "John"));
        assert!(service.users().is_empty());
    }

    #[test]
    fn test_request_delete_declined() {
        let mut service = manager();
        service.submit(john()).unwrap();

        let mut confirmation = MockConfirmation::new();
        confirmation.expect_confirm().times(1).return_const(false);

        assert_eq!(service.request_delete(0, &confirmation), DeleteOutcome::Declined);
        assert_eq!(service.users().len(), 1);
    }

    #[test]
    fn test_request_delete_out_of_range_never_prompts() {
        let mut service = manager();
        service.submit(john()).unwrap();

        let mut confirmation = MockConfirmation::new();
        confirmation.expect_confirm().times(0);

        assert_eq!(service.request_delete(5, &confirmation), DeleteOutcome::Ignored);
        assert_eq!(service.request_delete(-1, &confirmation), DeleteOutcome::Ignored);
        assert_eq!(service.users().len(), 1);
    }
}
