//! User domain types.

use chrono::{DateTime, Utc};

use inventory_hub_core::{Email, UserId};

/// A signed-up user (domain type).
///
/// Accounts come from email/password sign-up or from the first federated
/// sign-in; a user may have both a password and a Google subject.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name shown in the header; falls back to the email when blank.
    pub display_name: String,
    /// Avatar URL from the federated provider, if any.
    pub photo_url: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The name to greet the user with: display name, or email when unset.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        if self.display_name.is_empty() {
            self.email.as_str()
        } else {
            &self.display_name
        }
    }
}
