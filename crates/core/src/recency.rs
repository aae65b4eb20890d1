//! Run history - when each named operation last ran

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const SECS_PER_DAY: f64 = 86_400.0;

/// The `last_runs` part of the saved tracker data: operation name to the
/// epoch seconds it last ran at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(default)]
    pub last_runs: HashMap<String, f64>,
}

fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

impl RunRecord {
    /// True if `name` ran less than `n_days` ago
    pub fn recently_executed(&self, name: &str, n_days: f64) -> bool {
        self.recently_executed_at(name, n_days, now_secs())
    }

    /// [`RunRecord::recently_executed`] against a given clock reading
    pub fn recently_executed_at(&self, name: &str, n_days: f64, now: f64) -> bool {
        match self.last_runs.get(name) {
            Some(last) => now - last < n_days * SECS_PER_DAY,
            None => false,
        }
    }

    pub fn mark_executed(&mut self, name: &str) {
        self.mark_executed_at(name, now_secs());
    }

    pub fn mark_executed_at(&mut self, name: &str, now: f64) {
        tracing::debug!("Recording run of {}", name);
        self.last_runs.insert(name.to_string(), now);
    }
}
