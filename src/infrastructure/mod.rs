//! Infrastructure layer with external service adapters.

/// REST backend client.
pub mod api;
pub mod clock;
/// Application configuration.
pub mod config;
/// Session storage adapters.
pub mod storage;

pub use api::ApiClient;
pub use clock::SystemClock;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager, TokenBackend};
pub use storage::{KeyringTokenStorage, LocalSessionStore};
