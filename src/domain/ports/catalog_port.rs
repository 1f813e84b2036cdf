//! Read-only catalog port: songs, albums, artists, genres and search.

use async_trait::async_trait;

use crate::domain::entities::{
    Album, AlbumId, Artist, ArtistId, Genre, Page, PageRequest, SearchResults, Song, SongId,
};
use crate::domain::errors::ApiError;

/// Port for browsing the published catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn list_songs(&self, page: PageRequest) -> Result<Page<Song>, ApiError>;

    async fn get_song(&self, id: &SongId) -> Result<Song, ApiError>;

    async fn list_albums(&self, page: PageRequest) -> Result<Page<Album>, ApiError>;

    /// Fetches an album including its track list.
    async fn get_album(&self, id: &AlbumId) -> Result<Album, ApiError>;

    async fn list_artists(&self, page: PageRequest) -> Result<Page<Artist>, ApiError>;

    async fn get_artist(&self, id: &ArtistId) -> Result<Artist, ApiError>;

    async fn artist_songs(&self, id: &ArtistId) -> Result<Vec<Song>, ApiError>;

    async fn list_genres(&self) -> Result<Vec<Genre>, ApiError>;

    /// Full-text search across songs, albums, artists and public playlists.
    async fn search(&self, query: &str) -> Result<SearchResults, ApiError>;
}
