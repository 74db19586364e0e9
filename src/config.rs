//! netlabel configuration
//!
//! The sampler runs on fixed constants; there is no config file and no
//! environment lookup. `App` and `Collector` are built from
//! `NetLabelConfig::default()`.

use std::path::PathBuf;
use std::time::Duration;

use crate::system::procfs::PROC_NET_DEV;

#[derive(Debug, Clone, PartialEq)]
pub struct NetLabelConfig {
    /// Tick cadence
    pub sample_interval_ms: u64,
    /// Number of totals kept for averaging
    pub history_depth: usize,
    /// Bytes/sec a direction must reach to count as active
    pub min_speed: u64,
    /// How long a direction stays visible after its last active tick
    pub hide_after_ms: u64,
    pub counter_path: PathBuf,
}

impl Default for NetLabelConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 100,
            history_depth: 10, // 0.1s * 10 = 1s of history
            min_speed: 1024,
            hide_after_ms: 1000,
            counter_path: PathBuf::from(PROC_NET_DEV),
        }
    }
}

impl NetLabelConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn hide_after(&self) -> Duration {
        Duration::from_millis(self.hide_after_ms)
    }
}
