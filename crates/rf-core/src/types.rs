//! Settings record and shared type definitions
//!
//! Field names serialize in camelCase to stay compatible with the record
//! the browser extension keeps in its key-value storage (`isEnabled`,
//! `targetUrl`, ...). Missing fields deserialize to documented defaults,
//! so a partial stored record always merges into a complete one.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::matcher::normalize_pattern;
use crate::url::{extract_host, has_http_scheme};

// =============================================================================
// Redirect Mode
// =============================================================================

/// Behavior policy when a navigation matches a source site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum RedirectMode {
    /// Redirect to the target site immediately.
    #[default]
    Instant,
    /// Passive reminder only; the user self-regulates.
    Timer,
    /// Delayed redirect gated behind a countdown confirmation.
    Countdown,
}

// =============================================================================
// Settings
// =============================================================================

/// The single shared settings record.
///
/// Mutated by the popup UI and the pause/resume actions; last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Settings {
    /// Master switch for all interception.
    pub is_enabled: bool,
    /// Destination URL for redirects.
    pub target_url: String,
    /// Source-site patterns (bare hostnames or full URLs).
    pub source_sites: Vec<String>,
    /// Stored for forward compatibility; unused downstream.
    pub whitelist: Vec<String>,
    /// Pause deadline, ms since the epoch. 0 when not paused.
    pub pause_end_time: u64,
    pub is_paused: bool,
    /// Daily limit in minutes. 0 means unlimited. Unused downstream.
    pub daily_limit: u32,
    pub redirect_mode: RedirectMode,
    /// The user's stated purpose, shown as a reminder and pre-filled into
    /// countdown confirmations.
    pub user_purpose: String,
}

pub const DEFAULT_TARGET_URL: &str = "https://www.baidu.com";

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_enabled: true,
            target_url: DEFAULT_TARGET_URL.to_string(),
            source_sites: Vec::new(),
            whitelist: Vec::new(),
            pause_end_time: 0,
            is_paused: false,
            daily_limit: 0,
            redirect_mode: RedirectMode::Instant,
            user_purpose: String::new(),
        }
    }
}

impl Settings {
    /// Validate the record as loaded from storage.
    ///
    /// The target URL must be an absolute http(s) URL with a hostname;
    /// everything else has no invalid states beyond what the types rule out.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !has_http_scheme(&self.target_url) || extract_host(&self.target_url).is_none() {
            return Err(SettingsError::InvalidTargetUrl(self.target_url.clone()));
        }
        Ok(())
    }

    /// Validate in place, replacing an invalid target URL with the default.
    ///
    /// A bad stored value must never make the record unusable; it is logged
    /// and repaired instead.
    pub fn repair(&mut self) {
        if let Err(e) = self.validate() {
            log::warn!("invalid stored settings, using default target: {e}");
            self.target_url = DEFAULT_TARGET_URL.to_string();
        }
    }

    /// Add a source site from raw user input.
    ///
    /// The input is normalized (full URL reduced to its hostname, leading
    /// "www." stripped) and rejected if empty or already present. Returns
    /// the normalized entry that was stored.
    pub fn add_source_site(&mut self, raw: &str) -> Result<String, SettingsError> {
        let site = normalize_pattern(raw).to_ascii_lowercase();
        if site.is_empty() {
            return Err(SettingsError::EmptySite);
        }
        if self
            .source_sites
            .iter()
            .any(|existing| normalize_pattern(existing).eq_ignore_ascii_case(&site))
        {
            return Err(SettingsError::DuplicateSite(site));
        }
        self.source_sites.push(site.clone());
        Ok(site)
    }

    /// Remove a source site by list position. Returns the removed entry.
    pub fn remove_source_site(&mut self, index: usize) -> Option<String> {
        if index < self.source_sites.len() {
            Some(self.source_sites.remove(index))
        } else {
            None
        }
    }
}

// =============================================================================
// Partial Update
// =============================================================================

/// A partial settings update, as sent by the popup.
///
/// Every field is optional; `apply` merges the present ones into an
/// existing record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct SettingsPatch {
    pub is_enabled: Option<bool>,
    pub target_url: Option<String>,
    pub source_sites: Option<Vec<String>>,
    pub whitelist: Option<Vec<String>>,
    pub pause_end_time: Option<u64>,
    pub is_paused: Option<bool>,
    pub daily_limit: Option<u32>,
    pub redirect_mode: Option<RedirectMode>,
    pub user_purpose: Option<String>,
}

impl SettingsPatch {
    /// Merge the present fields into `settings`.
    pub fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.is_enabled {
            settings.is_enabled = v;
        }
        if let Some(v) = self.target_url {
            settings.target_url = v;
        }
        if let Some(v) = self.source_sites {
            settings.source_sites = v;
        }
        if let Some(v) = self.whitelist {
            settings.whitelist = v;
        }
        if let Some(v) = self.pause_end_time {
            settings.pause_end_time = v;
        }
        if let Some(v) = self.is_paused {
            settings.is_paused = v;
        }
        if let Some(v) = self.daily_limit {
            settings.daily_limit = v;
        }
        if let Some(v) = self.redirect_mode {
            settings.redirect_mode = v;
        }
        if let Some(v) = self.user_purpose {
            settings.user_purpose = v;
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("target URL is not an absolute http(s) URL: '{0}'")]
    InvalidTargetUrl(String),
    #[error("source site is empty after normalization")]
    EmptySite,
    #[error("source site already configured: '{0}'")]
    DuplicateSite(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.is_enabled);
        assert_eq!(s.target_url, DEFAULT_TARGET_URL);
        assert_eq!(s.redirect_mode, RedirectMode::Instant);
        assert!(s.source_sites.is_empty());
        assert!(!s.is_paused);
        assert_eq!(s.pause_end_time, 0);
    }

    #[test]
    fn test_partial_record_merges_with_defaults() {
        // A stored record missing most keys still loads completely.
        let s: Settings =
            serde_json::from_str(r#"{"isEnabled": false, "sourceSites": ["douyin.com"]}"#)
                .unwrap();
        assert!(!s.is_enabled);
        assert_eq!(s.source_sites, vec!["douyin.com"]);
        assert_eq!(s.target_url, DEFAULT_TARGET_URL);
        assert_eq!(s.redirect_mode, RedirectMode::Instant);
    }

    #[test]
    fn test_camel_case_round_trip() {
        let s = Settings::default();
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("isEnabled").is_some());
        assert!(json.get("targetUrl").is_some());
        assert!(json.get("pauseEndTime").is_some());
        assert_eq!(json.get("redirectMode").unwrap(), "instant");
    }

    #[test]
    fn test_validate_rejects_non_url_target() {
        let mut s = Settings::default();
        s.target_url = "baidu.com".to_string();
        assert!(s.validate().is_err());
        s.repair();
        assert_eq!(s.target_url, DEFAULT_TARGET_URL);
    }

    #[test]
    fn test_add_source_site_normalizes() {
        let mut s = Settings::default();
        let added = s.add_source_site("https://www.Douyin.com/feed").unwrap();
        assert_eq!(added, "douyin.com");
        assert_eq!(s.source_sites, vec!["douyin.com"]);
    }

    #[test]
    fn test_add_source_site_rejects_duplicate() {
        let mut s = Settings::default();
        s.add_source_site("douyin.com").unwrap();
        assert!(matches!(
            s.add_source_site("www.douyin.com"),
            Err(SettingsError::DuplicateSite(_))
        ));
        assert_eq!(s.source_sites.len(), 1);
    }

    #[test]
    fn test_add_source_site_rejects_empty() {
        let mut s = Settings::default();
        assert!(matches!(s.add_source_site("   "), Err(SettingsError::EmptySite)));
    }

    #[test]
    fn test_remove_source_site() {
        let mut s = Settings::default();
        s.add_source_site("a.com").unwrap();
        s.add_source_site("b.com").unwrap();
        assert_eq!(s.remove_source_site(0).as_deref(), Some("a.com"));
        assert_eq!(s.source_sites, vec!["b.com"]);
        assert_eq!(s.remove_source_site(5), None);
    }

    #[test]
    fn test_patch_apply() {
        let mut s = Settings::default();
        let patch: SettingsPatch = serde_json::from_str(
            r#"{"isEnabled": false, "redirectMode": "countdown", "userPurpose": "study"}"#,
        )
        .unwrap();
        patch.apply(&mut s);
        assert!(!s.is_enabled);
        assert_eq!(s.redirect_mode, RedirectMode::Countdown);
        assert_eq!(s.user_purpose, "study");
        // Untouched fields keep their values
        assert_eq!(s.target_url, DEFAULT_TARGET_URL);
    }
}
