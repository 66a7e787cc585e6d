//! Refocus Core Library
//!
//! This crate provides the decision engine for the Refocus redirect tool:
//! given a navigated URL and the user's settings, decide whether to leave
//! the page alone, redirect it to the configured target site, show a
//! passive reminder, or gate a delayed redirect behind a countdown
//! confirmation.
//!
//! The engine is pure: no storage, no tabs, no timers. Callers feed in
//! wall-clock time and settings and act on the returned decisions. The
//! coordinator crate wires it to persistence and the tab host.
//!
//! # Modules
//!
//! - `url`: Fast hostname extraction without allocations
//! - `matcher`: Source-site pattern matching (directional suffix rule)
//! - `types`: Settings record, redirect modes, decisions
//! - `pause`: Global pause window with idempotent expiry
//! - `policy`: The redirect decision function
//! - `countdown`: Countdown confirmation state machine
//! - `session`: Per-page confirmation session (owns countdown + reminder)
//! - `usage`: Per-hostname per-day visit counters

pub mod countdown;
pub mod matcher;
pub mod pause;
pub mod policy;
pub mod session;
pub mod types;
pub mod url;
pub mod usage;

// Re-export commonly used types
pub use countdown::{Countdown, CountdownState, FIRST_COUNTDOWN_SECS, REPEAT_COUNTDOWN_SECS};
pub use matcher::{matches, normalize_pattern};
pub use pause::PauseWindow;
pub use policy::{decide, Action, Decision};
pub use session::{PageSession, SessionEffect};
pub use types::{RedirectMode, Settings, SettingsError, SettingsPatch};
pub use usage::UsageRecord;
