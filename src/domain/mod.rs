//! Domain layer with core business entities, rules and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Pure domain rules.
pub mod services;

pub use entities::{AuthToken, CachedProfile, Role, SongId, UserProfile};
pub use errors::{ApiError, StorageError};
pub use ports::{Clock, PlayReportPort, ProfileCachePort, TokenStoragePort};
