//! File-backed session store.
//!
//! Keeps the bearer token and the cached profile as a flat JSON object under
//! the keys `accessToken`, `userName`, `userEmail` and `userAvatar`, in the
//! platform data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::entities::{AuthToken, CachedProfile};
use crate::domain::errors::StorageError;
use crate::domain::ports::{ProfileCachePort, TokenStoragePort};

const SESSION_FILE: &str = "session.json";

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const USER_NAME_KEY: &str = "userName";
pub const USER_EMAIL_KEY: &str = "userEmail";
pub const USER_AVATAR_KEY: &str = "userAvatar";

type Entries = BTreeMap<String, String>;

/// Session persistence in a JSON file.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written session behind.
pub struct LocalSessionStore {
    path: Option<PathBuf>,
    lock: Mutex<()>,
}

impl Default for LocalSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSessionStore {
    /// Creates a store in the platform data directory.
    ///
    /// Without a resolvable home directory reads yield nothing and writes fail
    /// with [`StorageError::NotAvailable`].
    #[must_use]
    pub fn new() -> Self {
        let path = ProjectDirs::from("com", "melodeck", "melodeck")
            .map(|dirs| dirs.data_dir().join(SESSION_FILE));
        if path.is_none() {
            warn!("Failed to determine project directories. Session persistence disabled.");
        }
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Creates a store backed by a specific file.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn require_path(&self) -> Result<&Path, StorageError> {
        self.path
            .as_deref()
            .ok_or_else(|| StorageError::NotAvailable("no data directory".to_string()))
    }

    async fn read_entries(&self) -> Result<Entries, StorageError> {
        let Some(path) = &self.path else {
            return Ok(Entries::new());
        };

        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StorageError::ReadFailed(e.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring malformed session file");
                Ok(Entries::new())
            }
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let path = self.require_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        fs::rename(&tmp_path, path)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        debug!(path = %path.display(), keys = entries.len(), "Session file written");
        Ok(())
    }

    async fn update<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        apply(&mut entries);
        self.write_entries(&entries).await
    }
}

#[async_trait]
impl TokenStoragePort for LocalSessionStore {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        let _guard = self.lock.lock().await;
        let entries = self.read_entries().await?;
        Ok(entries
            .get(ACCESS_TOKEN_KEY)
            .and_then(|value| AuthToken::new(value.as_str())))
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        debug!(token = %token, "Persisting access token");
        let value = token.as_str().to_string();
        self.update(move |entries| {
            entries.insert(ACCESS_TOKEN_KEY.to_string(), value);
        })
        .await
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        if self.path.is_none() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(ACCESS_TOKEN_KEY);
        })
        .await
        .map_err(|e| StorageError::ClearFailed(e.to_string()))
    }
}

#[async_trait]
impl ProfileCachePort for LocalSessionStore {
    async fn get_profile(&self) -> Result<Option<CachedProfile>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;

        let (Some(name), Some(email)) = (
            entries.remove(USER_NAME_KEY),
            entries.remove(USER_EMAIL_KEY),
        ) else {
            return Ok(None);
        };

        let avatar = entries
            .remove(USER_AVATAR_KEY)
            .filter(|url| !url.trim().is_empty());
        Ok(Some(CachedProfile::new(name, email, avatar)))
    }

    async fn store_profile(&self, profile: &CachedProfile) -> Result<(), StorageError> {
        let name = profile.name().to_string();
        let email = profile.email().to_string();
        let avatar = profile.avatar_url().map(String::from);

        self.update(move |entries| {
            entries.insert(USER_NAME_KEY.to_string(), name);
            entries.insert(USER_EMAIL_KEY.to_string(), email);
            match avatar {
                Some(url) => entries.insert(USER_AVATAR_KEY.to_string(), url),
                None => entries.remove(USER_AVATAR_KEY),
            };
        })
        .await
    }

    async fn clear_profile(&self) -> Result<(), StorageError> {
        if self.path.is_none() {
            return Ok(());
        }
        self.update(|entries| {
            for key in [USER_NAME_KEY, USER_EMAIL_KEY, USER_AVATAR_KEY] {
                entries.remove(key);
            }
        })
        .await
        .map_err(|e| StorageError::ClearFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> LocalSessionStore {
        LocalSessionStore::with_path(dir.path().join("nested").join(SESSION_FILE))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_session() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.get_token().await.unwrap().is_none());
        assert!(store.get_profile().await.unwrap().is_none());
        assert!(!store.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_token_round_trip_uses_access_token_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .store_token(&AuthToken::new_unchecked("tok-123"))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(store.path().unwrap()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["accessToken"], "tok-123");
        assert_eq!(store.get_token().await.unwrap().unwrap().as_str(), "tok-123");
    }

    #[tokio::test]
    async fn test_profile_and_token_are_independent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let profile = CachedProfile::new("Ada", "ada@example.com", Some("https://cdn/a.png".into()));

        store
            .store_token(&AuthToken::new_unchecked("tok"))
            .await
            .unwrap();
        store.store_profile(&profile).await.unwrap();
        store.delete_token().await.unwrap();

        assert!(store.get_token().await.unwrap().is_none());
        assert_eq!(store.get_profile().await.unwrap(), Some(profile));

        store.clear_profile().await.unwrap();
        assert!(store.get_profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_profile_without_avatar_drops_stale_avatar() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .store_profile(&CachedProfile::new("Ada", "ada@example.com", Some("old.png".into())))
            .await
            .unwrap();
        store
            .store_profile(&CachedProfile::new("Ada", "ada@example.com", None))
            .await
            .unwrap();

        let cached = store.get_profile().await.unwrap().unwrap();
        assert!(cached.avatar_url().is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SESSION_FILE);
        std::fs::write(&path, "not json").unwrap();
        let store = LocalSessionStore::with_path(&path);

        assert!(store.get_token().await.unwrap().is_none());

        store
            .store_token(&AuthToken::new_unchecked("fresh"))
            .await
            .unwrap();
        assert_eq!(store.get_token().await.unwrap().unwrap().as_str(), "fresh");
    }

    #[tokio::test]
    async fn test_deleting_missing_token_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.delete_token().await.is_ok());
        assert!(store.clear_profile().await.is_ok());
    }
}
