//! Admin panel port.

use async_trait::async_trait;

use crate::domain::entities::{
    ApplicationId, ApplicationReview, ApplicationStatus, ArtistApplication, Genre, GenreId,
    PlatformStats,
};
use crate::domain::errors::ApiError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminPort: Send + Sync {
    /// Lists artist applications, optionally filtered by status.
    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ArtistApplication>, ApiError>;

    async fn review_application(
        &self,
        id: &ApplicationId,
        review: &ApplicationReview,
    ) -> Result<ArtistApplication, ApiError>;

    async fn create_genre(&self, name: &str) -> Result<Genre, ApiError>;

    async fn delete_genre(&self, id: &GenreId) -> Result<(), ApiError>;

    async fn platform_stats(&self) -> Result<PlatformStats, ApiError>;
}
