//! Global pause window
//!
//! A single wall-clock interval during which all interception is
//! suspended. The window is stored in the settings record (`isPaused` +
//! `pauseEndTime`); this module keeps the transition logic in one place.
//!
//! Clearing is idempotent: the periodic one-second check and the
//! navigation handler can both observe the same expiry boundary, and only
//! the first observer gets the one-shot expiry signal (its consumer
//! reloads all matched tabs).

use crate::types::Settings;

/// Pause state at a point in time.
///
/// Invariant: `active` was only ever set true with a deadline in the
/// future; once `now >= end_time_ms`, the window must be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseWindow {
    pub active: bool,
    pub end_time_ms: u64,
}

impl PauseWindow {
    /// The cleared window.
    pub fn inactive() -> Self {
        Self { active: false, end_time_ms: 0 }
    }

    /// Start a pause lasting `duration_ms` from `now_ms`.
    ///
    /// The UI offers preset minute values; any positive duration is
    /// accepted here.
    pub fn start(now_ms: u64, duration_ms: u64) -> Self {
        Self { active: true, end_time_ms: now_ms.saturating_add(duration_ms) }
    }

    /// Read the pause state out of a settings record.
    pub fn from_settings(settings: &Settings) -> Self {
        Self { active: settings.is_paused, end_time_ms: settings.pause_end_time }
    }

    /// Write the pause state back into a settings record.
    pub fn store(&self, settings: &mut Settings) {
        settings.is_paused = self.active;
        settings.pause_end_time = self.end_time_ms;
    }

    /// True iff the window is active and the deadline has not passed.
    #[inline]
    pub fn is_active(&self, now_ms: u64) -> bool {
        self.active && now_ms < self.end_time_ms
    }

    /// Clear the window if it has expired.
    ///
    /// Returns true exactly once, on the tick that observes the expiry;
    /// every later tick sees an inactive window and returns false. The
    /// true return is the "pause expired" signal whose consumer reloads
    /// matched tabs.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.active && now_ms >= self.end_time_ms {
            *self = Self::inactive();
            return true;
        }
        false
    }

    /// Unconditionally clear the window (user pressed resume).
    ///
    /// The caller triggers the same matched-tab reload as expiry,
    /// regardless of whether a pause was actually active.
    pub fn resume(&mut self) {
        *self = Self::inactive();
    }
}
