//! Domain service for registration, login and bearer-token verification.

use serde::Serialize;
use thiserror::Error;

use crate::domain::UserId;
use crate::models::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Issued on successful registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// The authenticated caller together with a summary of what they own.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub project_count: u64,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and returns a session for it.
    ///
    /// # Errors
    ///
    /// [`AuthError::Validation`] on malformed input, [`AuthError::EmailTaken`]
    /// when the email is already registered.
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthSession, AuthError>;

    /// An unknown email and a wrong password both yield
    /// [`AuthError::InvalidCredentials`].
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    async fn me(&self, user_id: &UserId) -> Result<UserProfile, AuthError>;

    /// Returns the user id carried by a valid, unexpired token.
    fn verify_token(&self, token: &str) -> Result<UserId, AuthError>;
}
