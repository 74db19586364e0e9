use crate::config::NetLabelConfig;
use crate::format::{Hysteresis, IDLE_GLYPH};
use crate::system::network::{AggregateTotals, RateEstimate};

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub paused: bool, // p/z key: freeze sampling
    /// r key: re-initialise estimator and hysteresis on the next tick
    pub reset_requested: bool,

    // Latest pipeline output
    pub label: String,
    pub estimate: RateEstimate,
    pub totals: AggregateTotals,
    pub source_ok: bool,
    pub counter_resets: u64,

    // Display policy state, lives as long as the indicator
    pub hysteresis: Hysteresis,

    // Tick counter for refresh
    pub tick: u64,
}

impl App {
    pub fn new(config: &NetLabelConfig) -> Self {
        Self {
            should_quit: false,
            paused: false,
            reset_requested: false,

            label: IDLE_GLYPH.to_string(),
            estimate: RateEstimate::zero(),
            totals: AggregateTotals::default(),
            source_ok: true,
            counter_resets: 0,

            hysteresis: Hysteresis::new(config.min_speed as f64, config.hide_after()),

            tick: 0,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}
