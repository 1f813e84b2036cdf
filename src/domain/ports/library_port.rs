//! Listener library port: liked songs and playlists.

use async_trait::async_trait;

use crate::domain::entities::{Playlist, PlaylistDraft, PlaylistId, Song, SongId};
use crate::domain::errors::ApiError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryPort: Send + Sync {
    async fn liked_songs(&self) -> Result<Vec<Song>, ApiError>;

    async fn like_song(&self, id: &SongId) -> Result<(), ApiError>;

    async fn unlike_song(&self, id: &SongId) -> Result<(), ApiError>;

    /// Playlists owned by the current user.
    async fn list_playlists(&self) -> Result<Vec<Playlist>, ApiError>;

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Playlist, ApiError>;

    async fn create_playlist(&self, draft: &PlaylistDraft) -> Result<Playlist, ApiError>;

    async fn update_playlist(
        &self,
        id: &PlaylistId,
        draft: &PlaylistDraft,
    ) -> Result<Playlist, ApiError>;

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<(), ApiError>;

    async fn add_to_playlist(&self, id: &PlaylistId, song_id: &SongId) -> Result<(), ApiError>;

    async fn remove_from_playlist(
        &self,
        id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<(), ApiError>;
}
