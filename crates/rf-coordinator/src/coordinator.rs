//! The background coordinator
//!
//! Single logical actor: each handler runs to completion, and all state
//! lives in the settings store. The one-second periodic check and the
//! navigation handler can both observe a pause expiring; the window's
//! idempotent clear ensures the matched-tab reload fires once.

use chrono::NaiveDate;

use rf_core::pause::PauseWindow;
use rf_core::policy::{decide, Action, Decision};
use rf_core::usage::UsageRecord;
use rf_core::{matcher, Settings};

use crate::messages::{Request, Response};
use crate::store::{load_settings_or_default, SettingsStore};
use crate::tabs::TabHost;

pub struct Coordinator<S, T> {
    store: S,
    tabs: T,
}

impl<S: SettingsStore, T: TabHost> Coordinator<S, T> {
    pub fn new(store: S, tabs: T) -> Self {
        Self { store, tabs }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle a completed navigation in a tab.
    ///
    /// Clears an expired pause window lazily, decides the action, tracks
    /// usage for matched navigations, and applies an immediate redirect
    /// through the tab host. Countdown and reminder actions are returned
    /// for the page context to apply.
    pub fn on_navigation(
        &self,
        tab_id: i32,
        url: &str,
        now_ms: u64,
        today: NaiveDate,
    ) -> Decision {
        let mut settings = load_settings_or_default(&self.store);

        let mut pause = PauseWindow::from_settings(&settings);
        if pause.tick(now_ms) {
            self.clear_pause(&mut settings, pause);
        }

        let matched = matcher::matches(url, &settings.source_sites);
        let decision = decide(&settings, &pause, matched, now_ms);

        if decision.track_usage {
            self.track_usage(url, today);
        }

        if decision.action == Action::Redirect {
            if let Some(target) = &decision.target_url {
                log::debug!("redirecting tab {tab_id} from {url} to {target}");
                self.tabs.navigate_tab(tab_id, target);
            }
        }

        decision
    }

    /// The recurring one-second check: clear an expired pause window and
    /// reload matched tabs once when it expires.
    pub fn tick(&self, now_ms: u64) {
        let mut settings = load_settings_or_default(&self.store);
        let mut pause = PauseWindow::from_settings(&settings);
        if pause.tick(now_ms) {
            log::info!("pause expired, resuming interception");
            self.clear_pause(&mut settings, pause);
            self.reload_matched_tabs(&settings);
        }
    }

    /// Dispatch a popup request. Storage failures answer with a refused
    /// acknowledgement rather than an error; the popup shows a neutral
    /// failure state.
    pub fn handle_request(&self, request: Request, now_ms: u64) -> Response {
        match request {
            Request::GetSettings => Response::Settings(load_settings_or_default(&self.store)),

            Request::UpdateSettings { settings: patch } => {
                let mut settings = load_settings_or_default(&self.store);
                patch.apply(&mut settings);
                settings.repair();
                self.ack(self.store.save_settings(&settings))
            }

            Request::Pause { duration } => {
                let mut settings = load_settings_or_default(&self.store);
                let pause = PauseWindow::start(now_ms, duration);
                pause.store(&mut settings);
                match self.store.save_settings(&settings) {
                    Ok(()) => Response::Paused { success: true, end_time: pause.end_time_ms },
                    Err(e) => {
                        log::warn!("pause not applied: {e}");
                        Response::Ack { success: false }
                    }
                }
            }

            Request::Resume => {
                let mut settings = load_settings_or_default(&self.store);
                let mut pause = PauseWindow::from_settings(&settings);
                pause.resume();
                pause.store(&mut settings);
                let response = self.ack(self.store.save_settings(&settings));
                self.reload_matched_tabs(&settings);
                response
            }
        }
    }

    /// Reload every open tab whose URL matches the configured source
    /// sites. Fired on pause expiry and on explicit resume.
    fn reload_matched_tabs(&self, settings: &Settings) {
        for tab in self.tabs.list_tabs() {
            if matcher::matches(&tab.url, &settings.source_sites) {
                log::debug!("reloading matched tab {} ({})", tab.id, tab.url);
                self.tabs.reload_tab(tab.id);
            }
        }
    }

    fn clear_pause(&self, settings: &mut Settings, pause: PauseWindow) {
        pause.store(settings);
        if let Err(e) = self.store.save_settings(settings) {
            // The cleared window still governs this handler; the next
            // tick will retry the write.
            log::warn!("failed to persist cleared pause: {e}");
        }
    }

    fn track_usage(&self, url: &str, today: NaiveDate) {
        let mut record = match self.store.load_usage() {
            Ok(Some(record)) => record,
            Ok(None) => UsageRecord::new(today),
            Err(e) => {
                log::warn!("usage read failed, starting fresh: {e}");
                UsageRecord::new(today)
            }
        };
        if record.record(url, today).is_some() {
            if let Err(e) = self.store.save_usage(&record) {
                log::warn!("usage write failed: {e}");
            }
        }
    }

    fn ack(&self, result: Result<(), crate::store::StoreError>) -> Response {
        match result {
            Ok(()) => Response::Ack { success: true },
            Err(e) => {
                log::warn!("settings write failed: {e}");
                Response::Ack { success: false }
            }
        }
    }
}
