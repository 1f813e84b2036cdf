//! Stateful application services.

pub mod playback_tracker;
pub mod search_service;

pub use playback_tracker::{
    ActiveSession, MAX_PLAY_MS, MIN_PLAY_MS, PlaybackTracker, SessionOutcome, reportable_duration,
};
pub use search_service::{DEFAULT_DEBOUNCE, SearchError, SearchService};
