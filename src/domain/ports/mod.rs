mod admin_port;
mod auth_port;
mod catalog_port;
mod clock_port;
mod library_port;
mod play_report_port;
mod profile_cache_port;
mod studio_port;
mod token_storage_port;

pub use admin_port::AdminPort;
pub use auth_port::{AuthPort, AuthSession, ProfileUpdate};
pub use catalog_port::CatalogPort;
pub use clock_port::Clock;
pub use library_port::LibraryPort;
pub use play_report_port::PlayReportPort;
pub use profile_cache_port::ProfileCachePort;
pub use studio_port::StudioPort;
pub use token_storage_port::TokenStoragePort;

#[cfg(test)]
pub mod mocks {
    pub use super::admin_port::MockAdminPort;
    pub use super::auth_port::mock::MockAuthPort;
    pub use super::catalog_port::MockCatalogPort;
    pub use super::clock_port::mock::{ManualClock, TokioClock};
    pub use super::library_port::MockLibraryPort;
    pub use super::play_report_port::mock::MockPlayReporter;
    pub use super::profile_cache_port::mock::MockProfileCache;
    pub use super::studio_port::MockStudioPort;
    pub use super::token_storage_port::mock::MockTokenStorage;
}
