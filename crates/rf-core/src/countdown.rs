//! Countdown confirmation state machine
//!
//! A countdown gates a timed auto-redirect behind a free-text re-entry of
//! the user's purpose. Reaching zero always redirects: the redirect is
//! the safety-critical side, the display is not. Cancelling requires a
//! minimum-length purpose so the user has to articulate a real reason.

/// Seconds for the first countdown shown on a page context.
pub const FIRST_COUNTDOWN_SECS: u32 = 15;
/// Seconds for a periodic re-confirmation countdown.
pub const REPEAT_COUNTDOWN_SECS: u32 = 10;
/// Minimum trimmed purpose length required to cancel.
pub const MIN_PURPOSE_LEN: usize = 3;

/// Lifecycle of one countdown instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// Ticking toward the redirect.
    Running,
    /// User articulated a purpose and cancelled. Terminal.
    ConfirmedCancel,
    /// Reached zero; navigate to the target URL. Terminal.
    ExpiredRedirect,
}

/// One countdown confirmation. Lives only while an overlay is displayed;
/// destroyed on cancel or on reaching zero.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u32,
    purpose_text: String,
    target_url: String,
    state: CountdownState,
}

impl Countdown {
    /// Start a countdown, pre-filled with the last saved purpose text.
    pub fn new(initial_secs: u32, saved_purpose: &str, target_url: &str) -> Self {
        Self {
            remaining: initial_secs,
            purpose_text: saved_purpose.to_string(),
            target_url: target_url.to_string(),
            state: CountdownState::Running,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn purpose_text(&self) -> &str {
        &self.purpose_text
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Advance one second. Returns the new state; on the transition to
    /// `ExpiredRedirect` the caller navigates to `target_url()`. Ticking a
    /// terminal countdown is a no-op.
    pub fn tick(&mut self) -> CountdownState {
        if self.state == CountdownState::Running {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.state = CountdownState::ExpiredRedirect;
            }
        }
        self.state
    }

    /// Record a keystroke in the purpose field. The caller persists the
    /// text immediately so a purpose typed once survives later countdowns.
    pub fn set_purpose(&mut self, text: &str) {
        self.purpose_text = text.to_string();
    }

    /// Would a cancel be accepted right now?
    pub fn can_cancel(&self) -> bool {
        self.state == CountdownState::Running
            && self.purpose_text.trim().chars().count() >= MIN_PURPOSE_LEN
    }

    /// User pressed cancel. Accepted only while running with a purpose of
    /// at least [`MIN_PURPOSE_LEN`] trimmed characters; otherwise the
    /// state is unchanged. Returns whether the cancel took effect.
    pub fn submit_cancel(&mut self) -> bool {
        if !self.can_cancel() {
            return false;
        }
        self.state = CountdownState::ConfirmedCancel;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "https://www.baidu.com";

    #[test]
    fn test_runs_to_redirect() {
        let mut c = Countdown::new(3, "", TARGET);
        assert_eq!(c.tick(), CountdownState::Running);
        assert_eq!(c.remaining(), 2);
        assert_eq!(c.tick(), CountdownState::Running);
        assert_eq!(c.tick(), CountdownState::ExpiredRedirect);
        assert_eq!(c.target_url(), TARGET);
    }

    #[test]
    fn test_expires_even_with_untouched_purpose() {
        let mut c = Countdown::new(1, "", TARGET);
        assert_eq!(c.tick(), CountdownState::ExpiredRedirect);
    }

    #[test]
    fn test_tick_after_terminal_is_noop() {
        let mut c = Countdown::new(1, "", TARGET);
        c.tick();
        assert_eq!(c.tick(), CountdownState::ExpiredRedirect);
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn test_cancel_requires_min_purpose() {
        let mut c = Countdown::new(10, "", TARGET);

        c.set_purpose("ab");
        assert!(!c.can_cancel());
        assert!(!c.submit_cancel());
        assert_eq!(c.state(), CountdownState::Running);

        c.set_purpose("abc");
        assert!(c.can_cancel());
        assert!(c.submit_cancel());
        assert_eq!(c.state(), CountdownState::ConfirmedCancel);
    }

    #[test]
    fn test_cancel_trims_whitespace() {
        let mut c = Countdown::new(10, "", TARGET);
        c.set_purpose("  ab  ");
        assert!(!c.submit_cancel());
        c.set_purpose("  abc  ");
        assert!(c.submit_cancel());
    }

    #[test]
    fn test_saved_purpose_prefills() {
        let mut c = Countdown::new(10, "learn rust", TARGET);
        assert_eq!(c.purpose_text(), "learn rust");
        // Pre-filled purpose already satisfies the gate.
        assert!(c.submit_cancel());
    }

    #[test]
    fn test_cancel_after_expiry_rejected() {
        let mut c = Countdown::new(1, "a real purpose", TARGET);
        c.tick();
        assert!(!c.submit_cancel());
        assert_eq!(c.state(), CountdownState::ExpiredRedirect);
    }
}
