//! Popup message channel types
//!
//! Request/response pairs for the popup ⇄ coordinator channel. The wire
//! shape matches the legacy extension messages: requests are tagged by an
//! `action` field, responses are plain objects. TypeScript definitions
//! are exported for the popup side.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use rf_core::{Settings, SettingsPatch};

/// A request from the popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "action", rename_all = "camelCase")]
#[ts(export)]
pub enum Request {
    /// Full settings record, merged with defaults for missing fields.
    GetSettings,
    /// Partial merge into the stored settings.
    UpdateSettings { settings: SettingsPatch },
    /// Suspend interception for `duration` milliseconds.
    Pause { duration: u64 },
    /// Clear any pause and reload matched tabs.
    Resume,
}

/// A response to the popup.
///
/// Serialized untagged so the popup sees the same plain objects the
/// legacy background script sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged, rename_all_fields = "camelCase")]
#[ts(export)]
pub enum Response {
    /// Pause acknowledged, with the computed deadline.
    Paused { success: bool, end_time: u64 },
    /// Operation acknowledged (or refused, on a storage failure).
    Ack { success: bool },
    /// The full settings record.
    Settings(Settings),
}
