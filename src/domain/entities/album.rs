//! Album records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AlbumId, ArtistId, Song};
use crate::domain::serde_utils::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist_id: ArtistId,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub songs: Vec<Song>,
}

impl Album {
    /// Sum of all track lengths in seconds.
    #[must_use]
    pub fn total_duration_seconds(&self) -> u64 {
        self.songs.iter().map(|s| u64::from(s.duration_seconds)).sum()
    }
}

/// Album metadata submitted from the artist dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlbum {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl NewAlbum {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            release_date: None,
            cover_url: None,
        }
    }

    #[must_use]
    pub const fn released_on(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }
}
