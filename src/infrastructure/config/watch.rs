//! Poll loop timing and publish bookkeeping.

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Re-send an unchanged price after this many seconds.
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
    /// Upper bound on overlapping cycles.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    #[serde(default = "default_true")]
    pub rollback_on_publish_failure: bool,
}

const fn default_poll_interval_secs() -> u64 {
    10
}

const fn default_heartbeat_secs() -> u64 {
    60
}

const fn default_max_in_flight() -> usize {
    2
}

const fn default_true() -> bool {
    true
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            heartbeat_secs: default_heartbeat_secs(),
            max_in_flight: default_max_in_flight(),
            rollback_on_publish_failure: default_true(),
        }
    }
}

impl WatchConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub fn heartbeat(&self) -> chrono::Duration {
        // chrono panics beyond i64::MAX milliseconds
        let secs = i64::try_from(self.heartbeat_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        chrono::Duration::seconds(secs)
    }
}
