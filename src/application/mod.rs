//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateful services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, LoginResponse, RegisterRequest, TokenSource};
pub use services::{PlaybackTracker, SearchService, SessionOutcome};
pub use use_cases::{LoginUseCase, RegisterUseCase, ResolveSessionUseCase};
