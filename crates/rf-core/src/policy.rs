//! The redirect decision function
//!
//! One pure function turns (settings, pause state, matcher result, clock)
//! into a decision. First applicable rule wins: disabled, paused, and
//! unmatched navigations are left alone; otherwise the redirect mode picks
//! the primary action, usage is tracked once per navigation event, and a
//! reminder is layered on regardless of mode.

use crate::pause::PauseWindow;
use crate::types::{RedirectMode, Settings};

// =============================================================================
// Decision
// =============================================================================

/// Primary action for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the page alone.
    None,
    /// Navigate the tab to the target URL now.
    Redirect,
    /// Open a countdown confirmation gating a delayed redirect.
    /// Idempotent per page context: never stack a second overlay while
    /// one is running (enforced by the page session).
    StartCountdown,
    /// Passive reminder only; timer mode deliberately never forces a
    /// redirect so the user can self-regulate.
    ShowReminder,
}

/// Decision for one navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    /// Reminder display is layered with whichever primary action applies,
    /// not mutually exclusive with it.
    pub show_reminder: bool,
    /// Record one visit for this navigation (every mode, once per event).
    pub track_usage: bool,
    /// Destination when `action` requires navigation.
    pub target_url: Option<String>,
}

impl Default for Decision {
    fn default() -> Self {
        Self {
            action: Action::None,
            show_reminder: false,
            track_usage: false,
            target_url: None,
        }
    }
}

// =============================================================================
// Policy
// =============================================================================

/// Decide what to do about a navigation.
///
/// `matched` is the matcher's verdict for the navigated URL against the
/// configured source sites. `now_ms` only feeds the pause-window check;
/// callers that lazily clear an expired window should do so before calling.
pub fn decide(settings: &Settings, pause: &PauseWindow, matched: bool, now_ms: u64) -> Decision {
    if !settings.is_enabled {
        return Decision::default();
    }
    if pause.is_active(now_ms) {
        return Decision::default();
    }
    if !matched {
        return Decision::default();
    }

    let action = match settings.redirect_mode {
        RedirectMode::Instant => Action::Redirect,
        RedirectMode::Countdown => Action::StartCountdown,
        RedirectMode::Timer => Action::ShowReminder,
    };

    let target_url = match action {
        Action::Redirect | Action::StartCountdown => Some(settings.target_url.clone()),
        _ => None,
    };

    Decision { action, show_reminder: true, track_usage: true, target_url }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u64 = 1_700_000_000_000;

    fn settings(mode: RedirectMode) -> Settings {
        let mut s = Settings::default();
        s.redirect_mode = mode;
        s.source_sites = vec!["x.com".to_string()];
        s
    }

    #[test]
    fn test_instant_redirects() {
        let s = settings(RedirectMode::Instant);
        let d = decide(&s, &PauseWindow::inactive(), true, T);
        assert_eq!(d.action, Action::Redirect);
        assert_eq!(d.target_url.as_deref(), Some(s.target_url.as_str()));
        assert!(d.show_reminder);
        assert!(d.track_usage);
    }

    #[test]
    fn test_countdown_mode() {
        let s = settings(RedirectMode::Countdown);
        let d = decide(&s, &PauseWindow::inactive(), true, T);
        assert_eq!(d.action, Action::StartCountdown);
        assert!(d.target_url.is_some());
        assert!(d.track_usage);
    }

    #[test]
    fn test_timer_mode_is_passive() {
        let s = settings(RedirectMode::Timer);
        let d = decide(&s, &PauseWindow::inactive(), true, T);
        assert_eq!(d.action, Action::ShowReminder);
        assert_eq!(d.target_url, None);
        assert!(d.show_reminder);
        // Usage is still tracked in passive mode.
        assert!(d.track_usage);
    }

    #[test]
    fn test_disabled_wins() {
        let mut s = settings(RedirectMode::Instant);
        s.is_enabled = false;
        let d = decide(&s, &PauseWindow::inactive(), true, T);
        assert_eq!(d, Decision::default());
    }

    #[test]
    fn test_active_pause_wins() {
        let s = settings(RedirectMode::Instant);
        let pause = PauseWindow::start(T, 5_000);
        let d = decide(&s, &pause, true, T);
        assert_eq!(d, Decision::default());
        assert!(!d.track_usage);
    }

    #[test]
    fn test_expired_pause_does_not_block() {
        let s = settings(RedirectMode::Instant);
        let pause = PauseWindow::start(T, 5_000);
        let d = decide(&s, &pause, true, T + 5_000);
        assert_eq!(d.action, Action::Redirect);
    }

    #[test]
    fn test_unmatched_is_none() {
        let s = settings(RedirectMode::Instant);
        let d = decide(&s, &PauseWindow::inactive(), false, T);
        assert_eq!(d, Decision::default());
    }
}
