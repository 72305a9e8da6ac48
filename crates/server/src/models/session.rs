//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use inventory_hub_core::{Email, UserId};

use crate::models::User;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in user; the
/// only identity data handlers ever read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name for the header greeting.
    pub display_name: String,
    /// Avatar URL, when the federated provider supplied one.
    pub photo_url: Option<String>,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.greeting_name().to_owned(),
            photo_url: user.photo_url.clone(),
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for Google OAuth state (CSRF protection).
    pub const GOOGLE_OAUTH_STATE: &str = "google_oauth_state";
}
