//! Per-hostname per-day visit counters
//!
//! One increment per matched navigation event, not per elapsed time. The
//! record covers a single calendar day; the first visit of a new day
//! replaces it wholesale.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::url::{extract_host, strip_www};

/// Visit counts for one calendar day.
///
/// Serializes as `{"date": "2024-01-01", "usage": {"douyin.com": 3}}`,
/// the layout the legacy storage used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub date: NaiveDate,
    pub usage: HashMap<String, u32>,
}

impl UsageRecord {
    /// Fresh empty record for `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { date: today, usage: HashMap::new() }
    }

    /// Record one matched navigation to `url`.
    ///
    /// Rolls the record over when the day has changed. Returns the
    /// hostname that was counted, or None if the URL has no extractable
    /// hostname (in which case the record is untouched).
    pub fn record(&mut self, url: &str, today: NaiveDate) -> Option<String> {
        let host = strip_www(extract_host(url)?).to_ascii_lowercase();

        if self.date != today {
            *self = Self::new(today);
        }

        let count = self.usage.entry(host.clone()).or_insert(0);
        *count = count.saturating_add(1);

        Some(host)
    }

    /// Total visits recorded today.
    pub fn total_visits(&self) -> u32 {
        self.usage.values().copied().sum()
    }
}
