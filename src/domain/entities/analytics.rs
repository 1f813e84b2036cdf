//! Play events and dashboard statistics.

use serde::{Deserialize, Serialize};

use super::SongId;
use crate::domain::serde_utils::null_as_default;

/// One finished play session, as reported to the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayReport {
    pub song_id: SongId,
    pub duration_ms: u64,
}

impl PlayReport {
    #[must_use]
    pub const fn new(song_id: SongId, duration_ms: u64) -> Self {
        Self {
            song_id,
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPlays {
    pub song_id: SongId,
    pub title: String,
    pub plays: u64,
}

/// Artist dashboard summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistStats {
    #[serde(default)]
    pub total_plays: u64,
    #[serde(default)]
    pub total_listen_ms: u64,
    #[serde(default)]
    pub monthly_listeners: u64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub top_songs: Vec<SongPlays>,
}

impl ArtistStats {
    /// Average reported listening time per play, in milliseconds.
    #[must_use]
    pub const fn average_listen_ms(&self) -> u64 {
        if self.total_plays == 0 {
            0
        } else {
            self.total_listen_ms / self.total_plays
        }
    }
}

/// Admin panel summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_artists: u64,
    #[serde(default)]
    pub total_songs: u64,
    #[serde(default)]
    pub total_plays: u64,
}
