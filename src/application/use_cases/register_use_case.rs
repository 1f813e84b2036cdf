//! Account registration use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::RegisterRequest;
use crate::domain::entities::UserProfile;
use crate::domain::errors::ApiError;
use crate::domain::ports::AuthPort;
use crate::domain::services::{looks_like_email, normalize_email, validate_password};

/// Validates the registration form locally before creating the account.
pub struct RegisterUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl RegisterUseCase {
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// # Errors
    /// Returns `Validation` for a blank name, malformed email or a password the
    /// policy refuses (the message carries the policy reason); otherwise
    /// whatever the backend reports.
    pub async fn execute(&self, request: RegisterRequest) -> Result<UserProfile, ApiError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("name is required"));
        }
        if !looks_like_email(&request.email) {
            return Err(ApiError::validation("email address is not valid"));
        }

        validate_password(
            &request.password,
            request.confirmation.as_ref().map(|c| c.as_str()),
        )
        .map_err(|reason| {
            debug!(reason = reason.code(), "Password refused by policy");
            ApiError::validation(reason.to_string())
        })?;

        let email = normalize_email(&request.email);
        let profile = self
            .auth_port
            .register(name, &email, &request.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "Registration failed");
                e
            })?;

        info!(user_id = %profile.id(), "Account created");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockAuthPort;

    #[tokio::test]
    async fn test_register_success() {
        let auth = Arc::new(MockAuthPort::new(true));
        let use_case = RegisterUseCase::new(auth.clone());

        let profile = use_case
            .execute(
                RegisterRequest::new(" Ada ", "Ada.L@Gmail.com", "abc123!@")
                    .with_confirmation("abc123!@"),
            )
            .await
            .unwrap();

        assert_eq!(profile.name(), "Ada");
        assert_eq!(auth.last_email().as_deref(), Some("adal@gmail.com"));
    }

    #[tokio::test]
    async fn test_weak_password_never_reaches_backend() {
        let auth = Arc::new(MockAuthPort::new(true));
        let use_case = RegisterUseCase::new(auth.clone());

        let result = use_case
            .execute(RegisterRequest::new("Ada", "ada@example.com", "abc12345"))
            .await;

        match result {
            Err(ApiError::Validation { message }) => assert!(message.contains("one of")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(auth.calls(), 0);
    }

    #[tokio::test]
    async fn test_confirmation_mismatch() {
        let use_case = RegisterUseCase::new(Arc::new(MockAuthPort::new(true)));

        let result = use_case
            .execute(
                RegisterRequest::new("Ada", "ada@example.com", "abc123!@")
                    .with_confirmation("abc123!!"),
            )
            .await;

        match result {
            Err(ApiError::Validation { message }) => {
                assert_eq!(message, "passwords do not match");
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let use_case = RegisterUseCase::new(Arc::new(MockAuthPort::new(true)));
        let result = use_case
            .execute(RegisterRequest::new("  ", "ada@example.com", "abc123!@"))
            .await;
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }
}
