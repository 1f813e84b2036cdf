//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, LogLevel, TokenBackend};
pub use args::{AdminCommand, CliArgs, Command, PageArgs, PlaylistCommand, StudioCommand};
pub use storage::{ConfigError, StorageManager};
