use std::path::Path;
use std::time::Instant;

use sysinfo::Networks;

use crate::app::App;
use crate::config::NetLabelConfig;
use crate::system::estimator::RateEstimator;
use crate::system::filter;
use crate::system::network::{AggregateTotals, InterfaceSample, RateEstimate};
use crate::system::procfs::ProcNetDev;
use crate::system::CounterError;

/// Anything that can report per-interface cumulative byte counters
pub trait CounterSource {
    /// Human-readable name, used in log messages
    fn name(&self) -> &str;

    /// Accepted interfaces for the current instant
    fn read(&mut self) -> Result<Vec<InterfaceSample>, CounterError>;
}

/// Portable counter source built on `sysinfo`, for hosts without procfs
pub struct SysinfoCounters {
    networks: Networks,
}

impl SysinfoCounters {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl CounterSource for SysinfoCounters {
    fn name(&self) -> &str {
        "sysinfo"
    }

    fn read(&mut self) -> Result<Vec<InterfaceSample>, CounterError> {
        // true = drop interfaces that disappeared since the last refresh
        self.networks.refresh(true);

        Ok(self
            .networks
            .iter()
            .filter(|(name, _)| !filter::is_excluded_name(name))
            .map(|(name, data)| InterfaceSample {
                name: name.to_string(),
                rx_bytes: data.total_received(),
                tx_bytes: data.total_transmitted(),
            })
            .collect())
    }
}

/// Pick procfs when the configured table exists, sysinfo otherwise
pub fn default_source(counter_path: &Path) -> Box<dyn CounterSource> {
    if counter_path.exists() {
        Box::new(ProcNetDev::new(counter_path))
    } else {
        log::info!(
            "{} not found, falling back to sysinfo counters",
            counter_path.display()
        );
        Box::new(SysinfoCounters::new())
    }
}

/// Runs the sampling pipeline once per tick and publishes the result
pub struct Collector {
    source: Box<dyn CounterSource>,
    estimator: RateEstimator,
    /// Whether the last read succeeded; used to log transitions only
    source_healthy: bool,
}

impl Collector {
    pub fn new(config: &NetLabelConfig) -> Self {
        Self::with_source(default_source(&config.counter_path), config)
    }

    pub fn with_source(source: Box<dyn CounterSource>, config: &NetLabelConfig) -> Self {
        Self {
            source,
            estimator: RateEstimator::new(config.history_depth, config.sample_interval()),
            source_healthy: true,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Re-initialise the estimator window
    pub fn reset(&mut self) {
        self.estimator.reset();
        self.source_healthy = true;
    }

    /// One tick: read, filter, aggregate, estimate. A failed read gives
    /// a zero estimate for this tick only and leaves the window alone.
    pub fn sample(&mut self) -> (Option<AggregateTotals>, RateEstimate) {
        match self.source.read() {
            Ok(samples) => {
                if !self.source_healthy {
                    log::info!("counter source {} recovered", self.source.name());
                    self.source_healthy = true;
                }
                let totals = AggregateTotals::from_samples(&samples);
                (Some(totals), self.estimator.on_tick(totals))
            }
            Err(e) => {
                if self.source_healthy {
                    log::warn!("{e}");
                    self.source_healthy = false;
                }
                (None, RateEstimate::zero())
            }
        }
    }

    /// Refresh the network rate and populate the App
    pub fn refresh(&mut self, app: &mut App, now: Instant) {
        if app.reset_requested {
            self.reset();
            app.hysteresis.reset();
            app.reset_requested = false;
        }

        if app.paused {
            return; // p/z key: freeze display
        }

        let (totals, estimate) = self.sample();
        app.source_ok = totals.is_some();
        if let Some(totals) = totals {
            app.totals = totals;
        }
        app.estimate = estimate;
        app.counter_resets = self.estimator.resets();
        app.label = app.hysteresis.to_display_string(estimate, now);
        app.tick += 1;
    }
}
