//! Typed identifiers for backend resources.

use serde::{Deserialize, Serialize};

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(with = "crate::domain::serde_utils::string_or_number")] String);

        impl $name {
            /// Creates identifier from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns identifier as string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }
    };
}

resource_id!(
    /// Song identifier.
    SongId
);
resource_id!(
    /// Album identifier.
    AlbumId
);
resource_id!(
    /// Artist identifier.
    ArtistId
);
resource_id!(
    /// Genre identifier.
    GenreId
);
resource_id!(
    /// Playlist identifier.
    PlaylistId
);
resource_id!(
    /// User account identifier.
    UserId
);
resource_id!(
    /// Artist application identifier.
    ApplicationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_number_and_string() {
        let a: SongId = serde_json::from_str("17").unwrap();
        let b: SongId = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "17");
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = AlbumId::from(9_u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"9\"");
    }
}
