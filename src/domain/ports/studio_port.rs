//! Artist dashboard port.

use async_trait::async_trait;

use crate::domain::entities::{
    Album, ArtistApplication, ArtistStats, NewAlbum, NewArtistApplication, NewSong, Song, SongId,
};
use crate::domain::errors::ApiError;

/// Publishing and statistics for artist accounts, plus the listener-side
/// application to become one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudioPort: Send + Sync {
    async fn create_song(&self, song: &NewSong) -> Result<Song, ApiError>;

    async fn delete_song(&self, id: &SongId) -> Result<(), ApiError>;

    async fn create_album(&self, album: &NewAlbum) -> Result<Album, ApiError>;

    async fn artist_stats(&self) -> Result<ArtistStats, ApiError>;

    async fn submit_application(
        &self,
        application: &NewArtistApplication,
    ) -> Result<ArtistApplication, ApiError>;

    /// The caller's own application, if one was ever submitted.
    async fn my_application(&self) -> Result<Option<ArtistApplication>, ApiError>;
}
