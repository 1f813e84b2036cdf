//! Port for the locally cached display name, email and avatar.

use async_trait::async_trait;

use crate::domain::entities::CachedProfile;
use crate::domain::errors::StorageError;

#[async_trait]
pub trait ProfileCachePort: Send + Sync {
    async fn get_profile(&self) -> Result<Option<CachedProfile>, StorageError>;

    async fn store_profile(&self, profile: &CachedProfile) -> Result<(), StorageError>;

    async fn clear_profile(&self) -> Result<(), StorageError>;
}
