//! Melodeck - command line client for a multi-role music streaming service.
//!
//! The crate is layered hexagonally: the domain defines records, errors and
//! ports; the application layer holds the auth use cases, the playback
//! session tracker and the debounced search service; infrastructure adapts
//! the REST backend, local session storage and configuration.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and DTOs.
pub mod application;
/// Domain layer containing entities, errors, ports and pure services.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing command dispatch and output.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "melodeck";
