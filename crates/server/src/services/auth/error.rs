//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::google::GoogleAuthError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] inventory_hub_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Sign-up passwords do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Federated sign-in failed.
    #[error("google sign-in failed: {0}")]
    Google(#[from] GoogleAuthError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
