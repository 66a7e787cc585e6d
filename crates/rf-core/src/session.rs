//! Per-page confirmation session
//!
//! One `PageSession` owns everything interception shows on a page: the
//! reminder widget, at most one countdown confirmation, and the periodic
//! re-confirmation schedule. It replaces the historical tangle of
//! module-level overlay/interval globals with a single owner that has
//! defined creation (navigation), destruction (navigation away), and a
//! single timer: the host calls [`PageSession::tick`] once per second and
//! applies the returned effects.

use crate::countdown::{Countdown, CountdownState, FIRST_COUNTDOWN_SECS, REPEAT_COUNTDOWN_SECS};
use crate::policy::{Action, Decision};

/// Seconds between a cancelled countdown and its re-confirmation.
pub const REPEAT_INTERVAL_SECS: u32 = 300;

/// Side effects for the page host to apply, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Navigate the page to this URL.
    Redirect(String),
    /// Show (or refresh) the on-page reminder widget.
    ShowReminder,
    /// A countdown overlay should be rendered for the current countdown.
    CountdownStarted,
    /// Remove the countdown overlay.
    DismissCountdown,
    /// Persist this text as the stored user purpose.
    PersistPurpose(String),
}

/// State for one page context.
#[derive(Debug)]
pub struct PageSession {
    purpose: String,
    target_url: Option<String>,
    countdown: Option<Countdown>,
    reminder_visible: bool,
    /// Set after a cancelled countdown; counts down to re-confirmation.
    ticks_until_repeat: Option<u32>,
}

impl PageSession {
    /// Create the session for a freshly navigated page, seeded with the
    /// stored user purpose.
    pub fn new(saved_purpose: &str) -> Self {
        Self {
            purpose: saved_purpose.to_string(),
            target_url: None,
            countdown: None,
            reminder_visible: false,
            ticks_until_repeat: None,
        }
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn reminder_visible(&self) -> bool {
        self.reminder_visible
    }

    /// Apply a policy decision for this page.
    pub fn apply_decision(&mut self, decision: &Decision) -> Vec<SessionEffect> {
        let mut effects = Vec::new();

        if decision.show_reminder && !self.reminder_visible {
            self.reminder_visible = true;
            effects.push(SessionEffect::ShowReminder);
        }

        match decision.action {
            Action::Redirect => {
                if let Some(target) = &decision.target_url {
                    effects.push(SessionEffect::Redirect(target.clone()));
                }
            }
            Action::StartCountdown => {
                if let Some(target) = &decision.target_url {
                    self.target_url = Some(target.clone());
                    if self.start_countdown(FIRST_COUNTDOWN_SECS) {
                        effects.push(SessionEffect::CountdownStarted);
                    }
                }
            }
            Action::ShowReminder | Action::None => {}
        }

        effects
    }

    /// Advance the session's single one-second timer.
    ///
    /// Drives the running countdown if there is one, otherwise the
    /// re-confirmation schedule. The two never run concurrently, so a
    /// boundary tick cannot double-fire.
    pub fn tick(&mut self) -> Vec<SessionEffect> {
        let mut effects = Vec::new();

        if let Some(countdown) = &mut self.countdown {
            if countdown.tick() == CountdownState::ExpiredRedirect {
                let target = countdown.target_url().to_string();
                self.countdown = None;
                self.ticks_until_repeat = None;
                effects.push(SessionEffect::Redirect(target));
            }
            return effects;
        }

        if let Some(remaining) = &mut self.ticks_until_repeat {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.ticks_until_repeat = None;
                if self.start_countdown(REPEAT_COUNTDOWN_SECS) {
                    effects.push(SessionEffect::CountdownStarted);
                }
            }
        }

        effects
    }

    /// Keystroke in the countdown's purpose field. Persisted immediately
    /// so the purpose survives later countdowns.
    pub fn input_purpose(&mut self, text: &str) -> Vec<SessionEffect> {
        self.purpose = text.to_string();
        if let Some(countdown) = &mut self.countdown {
            countdown.set_purpose(text);
        }
        vec![SessionEffect::PersistPurpose(text.to_string())]
    }

    /// User pressed cancel on the countdown overlay. If the purpose gate
    /// accepts, the overlay is dismissed, the purpose persisted, the
    /// reminder kept, and the re-confirmation timer armed.
    pub fn submit_cancel(&mut self) -> Vec<SessionEffect> {
        let Some(countdown) = &mut self.countdown else {
            return Vec::new();
        };
        if !countdown.submit_cancel() {
            return Vec::new();
        }

        let purpose = countdown.purpose_text().to_string();
        self.purpose = purpose.clone();
        self.countdown = None;
        self.ticks_until_repeat = Some(REPEAT_INTERVAL_SECS);

        let mut effects = vec![
            SessionEffect::PersistPurpose(purpose),
            SessionEffect::DismissCountdown,
        ];
        if !self.reminder_visible {
            self.reminder_visible = true;
            effects.push(SessionEffect::ShowReminder);
        }
        effects
    }

    /// Start a countdown unless one is already running.
    fn start_countdown(&mut self, secs: u32) -> bool {
        if self.countdown.is_some() {
            return false;
        }
        let Some(target) = &self.target_url else {
            return false;
        };
        self.countdown = Some(Countdown::new(secs, &self.purpose, target));
        true
    }
}
