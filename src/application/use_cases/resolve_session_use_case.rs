//! Session resolution use case.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::TokenSource;
use crate::domain::entities::{AuthToken, CachedProfile};
use crate::domain::errors::ApiError;
use crate::domain::ports::{ProfileCachePort, TokenStoragePort};

/// Token to use for this run, with whatever profile is cached for it.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub token: AuthToken,
    pub source: TokenSource,
    pub profile: Option<CachedProfile>,
}

/// Resolves the bearer token from available sources.
pub struct ResolveSessionUseCase {
    token_storage: Arc<dyn TokenStoragePort>,
    profile_cache: Arc<dyn ProfileCachePort>,
}

impl ResolveSessionUseCase {
    #[must_use]
    pub const fn new(
        token_storage: Arc<dyn TokenStoragePort>,
        profile_cache: Arc<dyn ProfileCachePort>,
    ) -> Self {
        Self {
            token_storage,
            profile_cache,
        }
    }

    /// Resolves token from local storage or CLI/Env.
    ///
    /// Priority:
    /// 1. Saved session
    /// 2. CLI/Env (passed as argument)
    ///
    /// # Errors
    /// Does not fail on unreadable storage; the error type is kept for callers
    /// that chain other fallible steps.
    pub async fn execute(
        &self,
        cli_token: Option<String>,
    ) -> Result<Option<ResolvedSession>, ApiError> {
        debug!("Checking local storage for saved session");
        match self.token_storage.get_token().await {
            Ok(Some(token)) => {
                info!("Using saved session");
                let profile = self.profile_cache.get_profile().await.unwrap_or_else(|e| {
                    debug!(error = %e, "Cached profile unreadable");
                    None
                });
                return Ok(Some(ResolvedSession {
                    token,
                    source: TokenSource::Stored,
                    profile,
                }));
            }
            Ok(None) => debug!("No saved session"),
            Err(e) => debug!(error = %e, "Failed to read saved session"),
        }

        if let Some(token) = cli_token.as_deref().and_then(AuthToken::new) {
            info!("Using token from command line / environment");
            return Ok(Some(ResolvedSession {
                token,
                source: TokenSource::CommandLine,
                profile: None,
            }));
        }

        debug!("No token found in any source");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockProfileCache, MockTokenStorage};

    #[tokio::test]
    async fn test_saved_session_priority() {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked(
            "saved-token",
        )));
        let cache = Arc::new(MockProfileCache::with_profile(CachedProfile::new(
            "Ada",
            "ada@example.com",
            None,
        )));
        let use_case = ResolveSessionUseCase::new(storage, cache);

        let resolved = use_case
            .execute(Some("cli-token".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.source, TokenSource::Stored);
        assert_eq!(resolved.token.as_str(), "saved-token");
        assert_eq!(resolved.profile.unwrap().name(), "Ada");
    }

    #[tokio::test]
    async fn test_cli_fallback() {
        let use_case = ResolveSessionUseCase::new(
            Arc::new(MockTokenStorage::new()),
            Arc::new(MockProfileCache::new()),
        );

        let resolved = use_case
            .execute(Some("cli-token".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.source, TokenSource::CommandLine);
        assert!(resolved.profile.is_none());
    }

    #[tokio::test]
    async fn test_blank_cli_token_ignored() {
        let use_case = ResolveSessionUseCase::new(
            Arc::new(MockTokenStorage::new()),
            Arc::new(MockProfileCache::new()),
        );

        assert!(use_case.execute(Some("   ".to_string())).await.unwrap().is_none());
        assert!(use_case.execute(None).await.unwrap().is_none());
    }
}
