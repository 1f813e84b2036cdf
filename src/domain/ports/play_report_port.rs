//! Port for delivering finished play sessions to analytics.

use async_trait::async_trait;

use crate::domain::entities::PlayReport;
use crate::domain::errors::ApiError;

#[async_trait]
pub trait PlayReportPort: Send + Sync {
    /// Sends one play event. Called at most once per finished session.
    async fn report_play(&self, report: &PlayReport) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use parking_lot::Mutex;

    /// Records every report it receives.
    #[derive(Default)]
    pub struct MockPlayReporter {
        reports: Mutex<Vec<PlayReport>>,
        fail: AtomicBool,
    }

    impl MockPlayReporter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Reporter whose calls are recorded and then fail.
        pub fn failing() -> Self {
            let reporter = Self::default();
            reporter.fail.store(true, Ordering::SeqCst);
            reporter
        }

        pub fn reports(&self) -> Vec<PlayReport> {
            self.reports.lock().clone()
        }
    }

    #[async_trait]
    impl PlayReportPort for MockPlayReporter {
        async fn report_play(&self, report: &PlayReport) -> Result<(), ApiError> {
            self.reports.lock().push(report.clone());
            if self.fail.load(Ordering::SeqCst) {
                Err(ApiError::network("mock analytics outage"))
            } else {
                Ok(())
            }
        }
    }
}
