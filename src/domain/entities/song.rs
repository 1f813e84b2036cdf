//! Song and genre records.

use serde::{Deserialize, Serialize};

use super::{AlbumId, ArtistId, GenreId, SongId};
use crate::domain::services::duration::format_duration;

/// A playable track as published by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist_id: ArtistId,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album_id: Option<AlbumId>,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub play_count: u64,
}

impl Song {
    /// Returns the track length formatted for display (`m:ss`).
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_duration(f64::from(self.duration_seconds))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Song metadata submitted from the artist dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<AlbumId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<GenreId>,
    pub duration_seconds: u32,
    pub audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl NewSong {
    #[must_use]
    pub fn new(title: impl Into<String>, audio_url: impl Into<String>, duration_seconds: u32) -> Self {
        Self {
            title: title.into(),
            album_id: None,
            genre_id: None,
            duration_seconds,
            audio_url: audio_url.into(),
            cover_url: None,
        }
    }

    #[must_use]
    pub fn with_album(mut self, album_id: AlbumId) -> Self {
        self.album_id = Some(album_id);
        self
    }

    #[must_use]
    pub fn with_genre(mut self, genre_id: GenreId) -> Self {
        self.genre_id = Some(genre_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_from_backend_payload() {
        let json = r#"{
            "id": 12,
            "title": "Night Drive",
            "artistId": "a-1",
            "artistName": "Lumen",
            "genre": {"id": 3, "name": "Synthwave"},
            "durationSeconds": 245,
            "playCount": 1000
        }"#;

        let song: Song = serde_json::from_str(json).unwrap();

        assert_eq!(song.id.as_str(), "12");
        assert_eq!(song.artist_name, "Lumen");
        assert_eq!(song.genre.as_ref().map(|g| g.name.as_str()), Some("Synthwave"));
        assert!(song.album_id.is_none());
        assert_eq!(song.formatted_duration(), "4:05");
    }

    #[test]
    fn test_new_song_omits_unset_fields() {
        let body = serde_json::to_value(NewSong::new("Intro", "https://cdn/x.mp3", 60)).unwrap();

        assert_eq!(body["title"], "Intro");
        assert_eq!(body["durationSeconds"], 60);
        assert!(body.get("albumId").is_none());
    }
}
