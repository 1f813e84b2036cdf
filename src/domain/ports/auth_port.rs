//! Authentication and account port definition.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{AuthToken, UserProfile};
use crate::domain::errors::ApiError;

/// Token and profile returned by a successful login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: AuthToken,
    pub profile: UserProfile,
}

impl AuthSession {
    #[must_use]
    pub const fn new(token: AuthToken, profile: UserProfile) -> Self {
        Self { token, profile }
    }
}

/// Editable account fields; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Port for login, registration and account operations.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError>;

    /// Creates a listener account.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ApiError>;

    /// Returns the profile owning the stored token.
    async fn current_user(&self) -> Result<UserProfile, ApiError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError>;

    async fn change_password(&self, current: &str, new_password: &str) -> Result<(), ApiError>;
}
