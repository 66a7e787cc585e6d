//! Settings and usage persistence
//!
//! The store is a key-value map keyed by setting name; this module models
//! it as two typed documents (the settings record and today's usage
//! record) behind a trait. Read failures are never fatal: callers fall
//! back to defaults and log, because a broken store must not block any
//! page (see `load_settings_or_default`).

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use rf_core::{Settings, UsageRecord};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

// =============================================================================
// Store Trait
// =============================================================================

/// Persistent key-value storage for the shared settings record and the
/// daily usage record. Last write wins; there is no conflict resolution.
pub trait SettingsStore {
    /// The stored settings record, or None if nothing was ever written.
    fn load_settings(&self) -> Result<Option<Settings>, StoreError>;
    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError>;

    /// Today's usage record, or None if nothing was ever written.
    fn load_usage(&self) -> Result<Option<UsageRecord>, StoreError>;
    fn save_usage(&self, usage: &UsageRecord) -> Result<(), StoreError>;
}

/// Load settings, merging defaults for missing data and degrading to the
/// full default record on any read failure. Invalid stored values are
/// repaired in place. This is the only settings read path handlers use.
pub fn load_settings_or_default<S: SettingsStore>(store: &S) -> Settings {
    let mut settings = match store.load_settings() {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(e) => {
            log::warn!("settings read failed, using defaults: {e}");
            Settings::default()
        }
    };
    settings.repair();
    settings
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Process-local store, used in tests and by the wasm host (which keeps
/// the authoritative copy in extension storage).
#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: Mutex<Option<Settings>>,
    usage: Mutex<Option<UsageRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        Ok(self.settings.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        *self.settings.lock().unwrap_or_else(|e| e.into_inner()) = Some(settings.clone());
        Ok(())
    }

    fn load_usage(&self) -> Result<Option<UsageRecord>, StoreError> {
        Ok(self.usage.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save_usage(&self, usage: &UsageRecord) -> Result<(), StoreError> {
        *self.usage.lock().unwrap_or_else(|e| e.into_inner()) = Some(usage.clone());
        Ok(())
    }
}

// =============================================================================
// JSON File Store
// =============================================================================

/// Everything persisted, as one flat JSON document. Settings keys sit at
/// the top level next to `todayUsage`, matching the legacy storage shape.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredState {
    #[serde(flatten)]
    settings: Settings,
    today_usage: Option<UsageRecord>,
}

/// Single-file JSON store, used by the CLI and by tests.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the whole document, or None if the file does not exist yet.
    fn read_state(&self) -> Result<Option<StoredState>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_state(&self, state: &StoredState) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        Ok(self.read_state()?.map(|state| state.settings))
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        let mut state = self.read_state()?.unwrap_or_default();
        state.settings = settings.clone();
        self.write_state(&state)
    }

    fn load_usage(&self) -> Result<Option<UsageRecord>, StoreError> {
        Ok(self.read_state()?.and_then(|state| state.today_usage))
    }

    fn save_usage(&self, usage: &UsageRecord) -> Result<(), StoreError> {
        let mut state = self.read_state()?.unwrap_or_default();
        state.today_usage = Some(usage.clone());
        self.write_state(&state)
    }
}
