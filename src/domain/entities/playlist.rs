//! Playlists and the listener library.

use serde::{Deserialize, Serialize};

use super::{PlaylistId, Song, SongId, UserId};
use crate::domain::serde_utils::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: UserId,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub songs: Vec<Song>,
}

impl Playlist {
    #[must_use]
    pub fn contains(&self, song_id: &SongId) -> bool {
        self.songs.iter().any(|s| &s.id == song_id)
    }
}

/// Create/update payload for a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_public: bool,
}

impl PlaylistDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_public: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn public(mut self) -> Self {
        self.is_public = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_song() {
        let json = r#"{
            "id": 1, "name": "Focus", "ownerId": 4,
            "songs": [{"id": 7, "title": "Rain", "artistId": 2}]
        }"#;
        let playlist: Playlist = serde_json::from_str(json).unwrap();

        assert!(playlist.contains(&SongId::from(7_u64)));
        assert!(!playlist.contains(&SongId::from(8_u64)));
        assert!(!playlist.is_public);
    }
}
