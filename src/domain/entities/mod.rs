//! Domain entity definitions.

mod album;
mod analytics;
mod artist;
mod ids;
mod playlist;
mod profile;
mod search;
mod song;
mod token;

pub use album::{Album, NewAlbum};
pub use analytics::{ArtistStats, PlatformStats, PlayReport, SongPlays};
pub use artist::{
    ApplicationReview, ApplicationStatus, Artist, ArtistApplication, NewArtistApplication,
};
pub use ids::{AlbumId, ApplicationId, ArtistId, GenreId, PlaylistId, SongId, UserId};
pub use playlist::{Playlist, PlaylistDraft};
pub use profile::{CachedProfile, Role, UserProfile};
pub use search::{Page, PageRequest, SearchResults};
pub use song::{Genre, NewSong, Song};
pub use token::AuthToken;
