//! Per-host intent memoization (spec.md §4.4 Rate-limiting, §5).
//!
//! Owned exclusively by the orchestrator loop task — no external mutators,
//! so no locking is required (spec.md §5 Shared resources).

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::models::Intent;

/// Default memoization window: 10 seconds (spec.md §4.4).
pub const DEFAULT_WINDOW_SECONDS: i64 = 10;

struct CachedIntent {
    intent: Intent,
    emitted_at: DateTime<Utc>,
}

/// Keyed by `target_blade.host` (spec.md §4.4).
#[derive(Default)]
pub struct IntentCache {
    entries: HashMap<String, CachedIntent>,
}

impl IntentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached intent for `host` if it is still younger than
    /// `window_seconds`. First call for a host always returns `None`
    /// (spec.md §4.4 "First call for a host always regenerates").
    pub fn fresh(&self, host: &str, now: DateTime<Utc>, window_seconds: i64) -> Option<&Intent> {
        let entry = self.entries.get(host)?;
        let age = now.signed_duration_since(entry.emitted_at);
        if age < chrono::Duration::seconds(window_seconds) {
            Some(&entry.intent)
        } else {
            None
        }
    }

    /// Record a newly emitted intent as the latest for `host`.
    pub fn remember(&mut self, host: String, intent: Intent, emitted_at: DateTime<Utc>) {
        self.entries.insert(host, CachedIntent { intent, emitted_at });
    }
}
