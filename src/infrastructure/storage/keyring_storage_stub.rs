//! Keyring storage for builds without the `keyring` feature.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;

/// Keyring backend placeholder; never holds a token and refuses writes.
pub struct KeyringTokenStorage;

impl KeyringTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn with_names(_service: impl Into<String>, _user: impl Into<String>) -> Self {
        Self
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        debug!("Keyring feature disabled - no token available");
        Ok(None)
    }

    async fn store_token(&self, _token: &AuthToken) -> Result<(), StorageError> {
        Err(StorageError::NotAvailable(
            "built without keyring support".to_string(),
        ))
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
