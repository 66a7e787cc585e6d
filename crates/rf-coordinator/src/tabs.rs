//! Tab host abstraction
//!
//! The coordinator never talks to a browser directly; it enumerates and
//! drives tabs through this trait. Operations are fire-and-forget: a tab
//! that fails to reload is the host's problem to log, never a reason to
//! fail a handler.

/// An open tab as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: i32,
    pub url: String,
}

/// Enumerate and drive browser tabs.
pub trait TabHost {
    /// All currently-open tabs.
    fn list_tabs(&self) -> Vec<Tab>;
    /// Reload a tab in place.
    fn reload_tab(&self, id: i32);
    /// Point a tab at a new URL.
    fn navigate_tab(&self, id: i32, url: &str);
}

/// A host with no tabs. Used by the CLI, where decisions are printed
/// rather than applied.
#[derive(Debug, Default)]
pub struct NoopTabHost;

impl TabHost for NoopTabHost {
    fn list_tabs(&self) -> Vec<Tab> {
        Vec::new()
    }

    fn reload_tab(&self, id: i32) {
        log::debug!("noop tab host: reload tab {id}");
    }

    fn navigate_tab(&self, id: i32, url: &str) {
        log::debug!("noop tab host: navigate tab {id} to {url}");
    }
}
