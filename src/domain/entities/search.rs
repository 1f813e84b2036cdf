//! Search results and paged listings.

use serde::{Deserialize, Serialize};

use super::{Album, Artist, Playlist, Song};
use crate::domain::serde_utils::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub songs: Vec<Song>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub albums: Vec<Album>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub artists: Vec<Artist>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub playlists: Vec<Playlist>,
}

impl SearchResults {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
            && self.albums.is_empty()
            && self.artists.is_empty()
            && self.playlists.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.songs.len() + self.albums.len() + self.artists.len() + self.playlists.len()
    }
}

/// Page selector for listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub const MAX_PAGE_SIZE: u32 = 100;

    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        let page_size = if page_size == 0 {
            1
        } else if page_size > Self::MAX_PAGE_SIZE {
            Self::MAX_PAGE_SIZE
        } else {
            page_size
        };
        Self { page, page_size }
    }

    #[must_use]
    pub const fn first() -> Self {
        Self::new(1, 20)
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.page + 1, self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }
}
