//! Play session accounting.
//!
//! A session runs from `start` to `stop_and_send`. Sessions shorter than
//! [`MIN_PLAY_MS`] are skips and are dropped; longer ones are reported once,
//! capped at [`MAX_PLAY_MS`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::{PlayReport, SongId};
use crate::domain::ports::{Clock, PlayReportPort};

/// Below this, a session counts as a skip.
pub const MIN_PLAY_MS: u64 = 5_000;

/// Upper bound on a single reported session (one hour).
pub const MAX_PLAY_MS: u64 = 3_600_000;

/// The in-flight session, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub song_id: SongId,
    pub started_at: DateTime<Utc>,
}

/// What happened to a session when it was finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Nothing was being tracked.
    Idle,
    /// Shorter than [`MIN_PLAY_MS`]; nothing sent.
    Skipped { song_id: SongId, elapsed_ms: u64 },
    /// Report delivered.
    Reported(PlayReport),
    /// Report attempted and failed; the failure was logged and dropped.
    ReportFailed(PlayReport),
}

/// Reportable duration for a session, or `None` when it is a skip.
#[must_use]
pub const fn reportable_duration(elapsed_ms: u64) -> Option<u64> {
    if elapsed_ms < MIN_PLAY_MS {
        None
    } else if elapsed_ms > MAX_PLAY_MS {
        Some(MAX_PLAY_MS)
    } else {
        Some(elapsed_ms)
    }
}

/// Tracks how long the current track has been playing and reports one play
/// event per finished session.
pub struct PlaybackTracker {
    reporter: Arc<dyn PlayReportPort>,
    clock: Arc<dyn Clock>,
    session: Mutex<Option<ActiveSession>>,
}

impl PlaybackTracker {
    #[must_use]
    pub fn new(reporter: Arc<dyn PlayReportPort>, clock: Arc<dyn Clock>) -> Self {
        Self {
            reporter,
            clock,
            session: Mutex::new(None),
        }
    }

    /// Begins tracking `song_id`. Any in-flight session is dropped unreported.
    pub async fn start(&self, song_id: SongId) {
        let mut session = self.session.lock().await;
        Self::begin(&mut session, song_id, self.clock.now());
    }

    /// Finalizes the in-flight session and returns to idle.
    ///
    /// Report failures never reach the caller.
    pub async fn stop_and_send(&self) -> SessionOutcome {
        let mut session = self.session.lock().await;
        self.finalize(&mut session).await
    }

    /// Finalizes the current session, then starts tracking `next`.
    ///
    /// The lock is held across both steps, so no other call can interleave.
    pub async fn switch_to(&self, next: SongId) -> SessionOutcome {
        let mut session = self.session.lock().await;
        let outcome = self.finalize(&mut session).await;
        Self::begin(&mut session, next, self.clock.now());
        outcome
    }

    /// Snapshot of the in-flight session.
    pub async fn current(&self) -> Option<ActiveSession> {
        self.session.lock().await.clone()
    }

    pub async fn is_tracking(&self) -> bool {
        self.session.lock().await.is_some()
    }

    fn begin(slot: &mut Option<ActiveSession>, song_id: SongId, now: DateTime<Utc>) {
        if let Some(previous) = slot.as_ref() {
            debug!(song_id = %previous.song_id, "Discarding unfinished session");
        }
        debug!(song_id = %song_id, "Play session started");
        *slot = Some(ActiveSession {
            song_id,
            started_at: now,
        });
    }

    async fn finalize(&self, slot: &mut Option<ActiveSession>) -> SessionOutcome {
        let Some(active) = slot.take() else {
            return SessionOutcome::Idle;
        };

        // A clock that went backwards counts as zero elapsed time.
        let elapsed_ms = u64::try_from(
            (self.clock.now() - active.started_at).num_milliseconds(),
        )
        .unwrap_or(0);

        let Some(duration_ms) = reportable_duration(elapsed_ms) else {
            debug!(song_id = %active.song_id, elapsed_ms, "Session too short, treated as skip");
            return SessionOutcome::Skipped {
                song_id: active.song_id,
                elapsed_ms,
            };
        };

        if duration_ms < elapsed_ms {
            debug!(elapsed_ms, duration_ms, "Session duration capped");
        }

        let report = PlayReport::new(active.song_id, duration_ms);
        match self.reporter.report_play(&report).await {
            Ok(()) => {
                info!(song_id = %report.song_id, duration_ms, "Play reported");
                SessionOutcome::Reported(report)
            }
            Err(e) => {
                warn!(error = %e, song_id = %report.song_id, "Failed to report play");
                SessionOutcome::ReportFailed(report)
            }
        }
    }
}
