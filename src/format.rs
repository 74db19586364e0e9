//! Rate formatting and the "hide after idle" display policy.

use std::time::{Duration, Instant};

use crate::system::network::RateEstimate;

const SPEED_UNITS: &[&str] = &[
    "B/s", "KiB/s", "MiB/s", "GiB/s", "TiB/s", "PiB/s", "EiB/s", "ZiB/s", "YiB/s",
];

pub const DOWN_GLYPH: &str = "↓";
pub const UP_GLYPH: &str = "↑";
/// Shown when neither direction carries significant traffic
pub const IDLE_GLYPH: &str = "-";

/// Format bytes/sec with a binary unit: "1023 B/s", "1 KiB/s", "1 MiB/s".
/// Callers clamp negative rates before formatting.
pub fn format_rate(bytes_per_sec: f64) -> String {
    let mut amount = bytes_per_sec;
    let mut unit = 0;
    while amount >= 1024.0 && unit < SPEED_UNITS.len() - 1 {
        amount /= 1024.0;
        unit += 1;
    }
    // round() first: `{:.0}` alone rounds ties to even
    format!("{:.0} {}", amount.round(), SPEED_UNITS[unit])
}

/// Remembers when each direction last carried interesting traffic, so
/// the label does not flicker when the rate hovers around the threshold.
#[derive(Debug, Clone)]
pub struct Hysteresis {
    min_speed: f64,
    hide_after: Duration,
    last_down_active: Option<Instant>,
    last_up_active: Option<Instant>,
}

impl Hysteresis {
    pub fn new(min_speed: f64, hide_after: Duration) -> Self {
        Self {
            min_speed,
            hide_after,
            last_down_active: None,
            last_up_active: None,
        }
    }

    pub fn reset(&mut self) {
        self.last_down_active = None;
        self.last_up_active = None;
    }

    /// Idle once strictly more than `hide_after` has passed since the
    /// direction was last at or above `min_speed`. Never active ⇒ idle.
    fn is_idle(&self, last_active: Option<Instant>, now: Instant) -> bool {
        match last_active {
            Some(at) => now.saturating_duration_since(at) > self.hide_after,
            None => true,
        }
    }

    pub fn down_idle(&self, now: Instant) -> bool {
        self.is_idle(self.last_down_active, now)
    }

    pub fn up_idle(&self, now: Instant) -> bool {
        self.is_idle(self.last_up_active, now)
    }

    /// Record this tick's estimate and render the label
    pub fn to_display_string(&mut self, estimate: RateEstimate, now: Instant) -> String {
        let down = estimate.down_bytes_per_sec.max(0.0);
        let up = estimate.up_bytes_per_sec.max(0.0);

        if down >= self.min_speed {
            self.last_down_active = Some(now);
        }
        if up >= self.min_speed {
            self.last_up_active = Some(now);
        }

        match (self.down_idle(now), self.up_idle(now)) {
            (true, true) => IDLE_GLYPH.to_string(),
            (true, false) => format!("{UP_GLYPH} {}", format_rate(up)),
            (false, true) => format!("{DOWN_GLYPH} {}", format_rate(down)),
            (false, false) => format!(
                "{DOWN_GLYPH} {} {UP_GLYPH} {}",
                format_rate(down),
                format_rate(up)
            ),
        }
    }
}
