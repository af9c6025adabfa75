//! In-memory store of registered users.

use domain::{
    normalize_email, university_options, DomainError, DomainResult, FilterCriteria, UniversityOption,
    User,
};

/// Ordered sequence of registered users.
///
/// Insertion order is preserved and never re-sorted. Emails are unique
/// (trimmed, case-insensitive) across the store.
#[derive(Debug, Clone, Default)]
pub struct RegistrationStore {
    users: Vec<User>,
}

impl RegistrationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with users, in order
    pub fn with_users(users: impl IntoIterator<Item = User>) -> DomainResult<Self> {
        let mut store = Self::new();
        for user in users {
            store.add(user)?;
        }
        Ok(store)
    }

    /// Append a user, rejecting an email that is already registered
    pub fn add(&mut self, user: User) -> DomainResult<()> {
        if self.contains_email(&user.email) {
            return Err(DomainError::duplicate_email(user.email.trim()));
        }
        self.users.push(user);
        Ok(())
    }

    /// Remove the user at `index`, shifting later users left
    pub fn remove(&mut self, index: i64) -> DomainResult<User> {
        let position = self.position(index)?;
        Ok(self.users.remove(position))
    }

    /// User at `index`, if it exists
    pub fn get(&self, index: i64) -> Option<&User> {
        self.position(index).ok().map(|position| &self.users[position])
    }

    /// Users matching the criteria, in insertion order.
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn query<'a>(
        &'a self,
        criteria: &'a FilterCriteria,
    ) -> impl Iterator<Item = &'a User> + Clone + 'a {
        self.users.iter().filter(move |user| criteria.matches(user))
    }

    /// University selection entries, led by the "All Universities" sentinel
    pub fn university_options(&self) -> &'static [UniversityOption] {
        university_options()
    }

    /// Check whether an email is already registered
    pub fn contains_email(&self, email: &str) -> bool {
        let key = normalize_email(email);
        self.users.iter().any(|user| user.email_key() == key)
    }

    /// Read-only view of every user
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn position(&self, index: i64) -> DomainResult<usize> {
        usize::try_from(index)
            .ok()
            .filter(|position| *position < self.users.len())
            .ok_or(DomainError::IndexOutOfRange {
                index,
                len: self.users.len(),
            })
    }
}
