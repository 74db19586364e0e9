/// One interface's cumulative counters, as reported for a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSample {
    pub name: String,
    /// Cumulative bytes received since the interface came up
    pub rx_bytes: u64,
    /// Cumulative bytes transmitted since the interface came up
    pub tx_bytes: u64,
}

/// Sum of all accepted interfaces' counters for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateTotals {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl AggregateTotals {
    pub fn new(rx_bytes: u64, tx_bytes: u64) -> Self {
        Self { rx_bytes, tx_bytes }
    }

    /// Sum a tick's samples. Saturates instead of wrapping on overflow.
    pub fn from_samples(samples: &[InterfaceSample]) -> Self {
        samples.iter().fold(Self::default(), |acc, s| Self {
            rx_bytes: acc.rx_bytes.saturating_add(s.rx_bytes),
            tx_bytes: acc.tx_bytes.saturating_add(s.tx_bytes),
        })
    }

    /// Bytes gained since `earlier`, clamped to zero per direction.
    /// The flag is set when either counter went backwards.
    pub fn delta_since(&self, earlier: &AggregateTotals) -> (AggregateTotals, bool) {
        let regressed = self.rx_bytes < earlier.rx_bytes || self.tx_bytes < earlier.tx_bytes;
        let delta = AggregateTotals {
            rx_bytes: self.rx_bytes.saturating_sub(earlier.rx_bytes),
            tx_bytes: self.tx_bytes.saturating_sub(earlier.tx_bytes),
        };
        (delta, regressed)
    }
}

/// Smoothed transfer rate for one tick (bytes per second)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateEstimate {
    pub down_bytes_per_sec: f64,
    pub up_bytes_per_sec: f64,
}

impl RateEstimate {
    pub fn new(down_bytes_per_sec: f64, up_bytes_per_sec: f64) -> Self {
        Self {
            down_bytes_per_sec,
            up_bytes_per_sec,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, rx: u64, tx: u64) -> InterfaceSample {
        InterfaceSample {
            name: name.to_string(),
            rx_bytes: rx,
            tx_bytes: tx,
        }
    }

    #[test]
    fn totals_sum_all_samples() {
        let totals = AggregateTotals::from_samples(&[sample("eth0", 100, 50), sample("wlan0", 7, 3)]);
        assert_eq!(totals, AggregateTotals::new(107, 53));
    }

    #[test]
    fn totals_saturate_on_overflow() {
        let totals = AggregateTotals::from_samples(&[sample("a", u64::MAX, 1), sample("b", 5, 1)]);
        assert_eq!(totals.rx_bytes, u64::MAX);
        assert_eq!(totals.tx_bytes, 2);
    }

    #[test]
    fn delta_clamps_regression_to_zero() {
        let before = AggregateTotals::new(1000, 1000);
        let after = AggregateTotals::new(10, 1500);
        let (delta, regressed) = after.delta_since(&before);
        assert!(regressed);
        assert_eq!(delta, AggregateTotals::new(0, 500));

        let (delta, regressed) = before.delta_since(&AggregateTotals::new(400, 0));
        assert!(!regressed);
        assert_eq!(delta, AggregateTotals::new(600, 1000));
    }
}
