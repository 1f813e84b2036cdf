//! Login and logout use case implementation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse};
use crate::domain::entities::{AuthToken, CachedProfile, UserProfile};
use crate::domain::errors::{ApiError, StorageError};
use crate::domain::ports::{AuthPort, ProfileCachePort, TokenStoragePort};
use crate::domain::services::{looks_like_email, normalize_email};

/// Handles the login workflow and clears the session on logout.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    token_storage: Arc<dyn TokenStoragePort>,
    profile_cache: Arc<dyn ProfileCachePort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        token_storage: Arc<dyn TokenStoragePort>,
        profile_cache: Arc<dyn ProfileCachePort>,
    ) -> Self {
        Self {
            auth_port,
            token_storage,
            profile_cache,
        }
    }

    /// Executes login with provided request.
    ///
    /// # Errors
    /// Returns error if the credentials are malformed or rejected by the backend.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        if !looks_like_email(&request.email) {
            warn!("Login attempted with malformed email");
            return Err(ApiError::invalid_credentials("email address is not valid"));
        }
        if request.password.is_empty() {
            return Err(ApiError::invalid_credentials("password is required"));
        }

        let email = normalize_email(&request.email);
        debug!(email = %email, "Attempting login");

        let session = self
            .auth_port
            .login(&email, &request.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "Login rejected");
                e
            })?;

        info!(
            user_id = %session.profile.id(),
            role = %session.profile.role(),
            "Successfully authenticated"
        );

        let session_persisted = if request.remember {
            match self.persist(&session.token, &session.profile).await {
                Ok(()) => {
                    info!("Session saved to local storage");
                    true
                }
                Err(e) => {
                    error!(error = %e, "Failed to save session to local storage");
                    false
                }
            }
        } else {
            debug!("Session persistence disabled, skipping storage");
            false
        };

        Ok(LoginResponse::new(session.profile, session_persisted))
    }

    /// Writes the token and the cached profile as a group.
    ///
    /// A failed profile write removes the token again, so a later run never
    /// resolves a stored session without its profile.
    async fn persist(
        &self,
        token: &AuthToken,
        profile: &UserProfile,
    ) -> Result<(), StorageError> {
        self.token_storage.store_token(token).await?;

        if let Err(e) = self
            .profile_cache
            .store_profile(&CachedProfile::from_profile(profile))
            .await
        {
            if let Err(rollback) = self.token_storage.delete_token().await {
                error!(error = %rollback, "Failed to roll back stored token");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Removes the token and the cached profile together.
    ///
    /// Both are attempted even if the first removal fails.
    ///
    /// # Errors
    /// Returns the first storage error encountered.
    pub async fn logout(&self) -> Result<(), ApiError> {
        debug!("Clearing local session");
        let token_result = self.token_storage.delete_token().await;
        let profile_result = self.profile_cache.clear_profile().await;

        match token_result.and(profile_result) {
            Ok(()) => {
                info!("Logged out, local session cleared");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to clear local session");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockAuthPort, MockProfileCache, MockTokenStorage};

    fn make_use_case(
        auth: Arc<MockAuthPort>,
        tokens: Arc<MockTokenStorage>,
        profiles: Arc<MockProfileCache>,
    ) -> LoginUseCase {
        LoginUseCase::new(auth, tokens, profiles)
    }

    #[tokio::test]
    async fn test_successful_login_persists_session() {
        let auth = Arc::new(MockAuthPort::new(true));
        let tokens = Arc::new(MockTokenStorage::new());
        let profiles = Arc::new(MockProfileCache::new());
        let use_case = make_use_case(auth, tokens.clone(), profiles.clone());

        let response = use_case
            .execute(LoginRequest::new("listener@example.com", "secret1!"))
            .await
            .unwrap();

        assert_eq!(response.profile.name(), "Test Listener");
        assert!(response.session_persisted);
        assert!(tokens.has_token().await.unwrap());
        let cached = profiles.get_profile().await.unwrap().unwrap();
        assert_eq!(cached.email(), "listener@example.com");
    }

    #[tokio::test]
    async fn test_login_sends_normalized_email() {
        let auth = Arc::new(MockAuthPort::new(true));
        let use_case = make_use_case(
            auth.clone(),
            Arc::new(MockTokenStorage::new()),
            Arc::new(MockProfileCache::new()),
        );

        use_case
            .execute(LoginRequest::new("  John.Doe@GMAIL.com ", "secret1!"))
            .await
            .unwrap();

        assert_eq!(auth.last_email().as_deref(), Some("johndoe@gmail.com"));
    }

    #[tokio::test]
    async fn test_malformed_email_skips_backend() {
        let auth = Arc::new(MockAuthPort::new(true));
        let use_case = make_use_case(
            auth.clone(),
            Arc::new(MockTokenStorage::new()),
            Arc::new(MockProfileCache::new()),
        );

        let result = use_case
            .execute(LoginRequest::new("not-an-email", "secret1!"))
            .await;

        assert!(matches!(result, Err(ApiError::InvalidCredentials { .. })));
        assert_eq!(auth.calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let tokens = Arc::new(MockTokenStorage::new());
        let use_case = make_use_case(
            Arc::new(MockAuthPort::new(false)),
            tokens.clone(),
            Arc::new(MockProfileCache::new()),
        );

        let result = use_case
            .execute(LoginRequest::new("listener@example.com", "wrong"))
            .await;

        assert!(matches!(result, Err(ApiError::InvalidCredentials { .. })));
        assert!(!tokens.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_without_persistence() {
        let tokens = Arc::new(MockTokenStorage::new());
        let profiles = Arc::new(MockProfileCache::new());
        let use_case = make_use_case(
            Arc::new(MockAuthPort::new(true)),
            tokens.clone(),
            profiles.clone(),
        );

        let response = use_case
            .execute(LoginRequest::new("listener@example.com", "secret1!").without_persistence())
            .await
            .unwrap();

        assert!(!response.session_persisted);
        assert!(!tokens.has_token().await.unwrap());
        assert!(profiles.get_profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_fail_login() {
        let use_case = make_use_case(
            Arc::new(MockAuthPort::new(true)),
            Arc::new(MockTokenStorage::failing_writes()),
            Arc::new(MockProfileCache::new()),
        );

        let response = use_case
            .execute(LoginRequest::new("listener@example.com", "secret1!"))
            .await
            .unwrap();

        assert!(!response.session_persisted);
    }

    #[tokio::test]
    async fn test_profile_write_failure_rolls_back_token() {
        let tokens = Arc::new(MockTokenStorage::new());
        let use_case = make_use_case(
            Arc::new(MockAuthPort::new(true)),
            tokens.clone(),
            Arc::new(MockProfileCache::failing_writes()),
        );

        let response = use_case
            .execute(LoginRequest::new("listener@example.com", "secret1!"))
            .await
            .unwrap();

        assert!(!response.session_persisted);
        assert!(!tokens.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_profile() {
        let tokens = Arc::new(MockTokenStorage::with_token(
            AuthToken::new_unchecked("stored-token"),
        ));
        let profiles = Arc::new(MockProfileCache::with_profile(CachedProfile::new(
            "Ada",
            "ada@example.com",
            None,
        )));
        let use_case = make_use_case(
            Arc::new(MockAuthPort::new(true)),
            tokens.clone(),
            profiles.clone(),
        );

        use_case.logout().await.unwrap();

        assert!(!tokens.has_token().await.unwrap());
        assert!(profiles.get_profile().await.unwrap().is_none());
    }
}
