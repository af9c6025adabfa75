//! Delete confirmation capability provided by the UI layer.

use domain::{User, CONFIRM_DELETE_HEADER, CONFIRM_DELETE_MESSAGE};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Prompt shown before a user is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub header: &'static str,
    pub message: &'static str,
    /// User the delete request targets
    pub user: User,
}

impl ConfirmPrompt {
    /// Standard delete prompt for a user
    pub fn delete(user: User) -> Self {
        Self {
            header: CONFIRM_DELETE_HEADER,
            message: CONFIRM_DELETE_MESSAGE,
            user,
        }
    }
}

/// Asks the person at the screen to accept or decline an action.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Confirmation {
    /// Returns `true` when the action is accepted
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}
