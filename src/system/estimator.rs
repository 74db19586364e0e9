//! Rolling-window rate estimation.
//!
//! The window keeps the last N cumulative totals. Each tick the rate is
//! the sum of the consecutive deltas across the window divided by the
//! time the real samples in it span. Deltas are taken pair by pair so a
//! counter that goes backwards (interface replugged, counter wrapped)
//! only loses that one pair: the negative delta is clamped to zero.

use std::time::Duration;

use crate::system::network::{AggregateTotals, RateEstimate};

/// Fixed-capacity FIFO of cumulative totals, backed by a ring buffer.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    slots: Box<[AggregateTotals]>,
    /// Index of the oldest slot
    head: usize,
    len: usize,
}

impl SampleWindow {
    /// An empty window. A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![AggregateTotals::default(); capacity.max(1)].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// A full window where every slot holds `totals`
    pub fn filled(capacity: usize, totals: AggregateTotals) -> Self {
        let mut window = Self::with_capacity(capacity);
        window.slots.fill(totals);
        window.len = window.capacity();
        window
    }

    /// A full window where every slot holds zero totals
    pub fn zero_filled(capacity: usize) -> Self {
        Self::filled(capacity, AggregateTotals::default())
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `totals` as the newest slot, evicting and returning the
    /// oldest one when the window is already full.
    pub fn push(&mut self, totals: AggregateTotals) -> Option<AggregateTotals> {
        let cap = self.capacity();
        if self.len == cap {
            let evicted = std::mem::replace(&mut self.slots[self.head], totals);
            self.head = (self.head + 1) % cap;
            Some(evicted)
        } else {
            let tail = (self.head + self.len) % cap;
            self.slots[tail] = totals;
            self.len += 1;
            None
        }
    }

    /// Slots from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &AggregateTotals> + '_ {
        let cap = self.capacity();
        (0..self.len).map(move |i| &self.slots[(self.head + i) % cap])
    }

    pub fn newest(&self) -> Option<&AggregateTotals> {
        match self.len {
            0 => None,
            n => Some(&self.slots[(self.head + n - 1) % self.capacity()]),
        }
    }
}

/// Sum of clamped consecutive deltas across the window
fn sum_deltas(window: &SampleWindow) -> AggregateTotals {
    let mut sum = AggregateTotals::default();
    let mut prev: Option<&AggregateTotals> = None;
    for slot in window.iter() {
        if let Some(earlier) = prev {
            let (delta, _) = slot.delta_since(earlier);
            sum.rx_bytes = sum.rx_bytes.saturating_add(delta.rx_bytes);
            sum.tx_bytes = sum.tx_bytes.saturating_add(delta.tx_bytes);
        }
        prev = Some(slot);
    }
    sum
}

/// Turns absolute counter snapshots into a smoothed transfer rate.
pub struct RateEstimator {
    window: SampleWindow,
    interval: Duration,
    /// Real samples currently in the window (the rest are fill)
    observed: usize,
    /// Counter regressions seen since the last reset
    resets: u64,
    /// Fill every slot with the next totals instead of pushing them
    reseed: bool,
}

impl RateEstimator {
    pub fn new(history_depth: usize, interval: Duration) -> Self {
        Self {
            window: SampleWindow::zero_filled(history_depth),
            interval,
            observed: 0,
            resets: 0,
            reseed: false,
        }
    }

    /// Forget the history. The next tick's totals fill the whole window,
    /// so the restart reads zero instead of the cumulative count.
    pub fn reset(&mut self) {
        self.window = SampleWindow::zero_filled(self.window.capacity());
        self.observed = 0;
        self.resets = 0;
        self.reseed = true;
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Push one tick's totals and compute the averaged rate.
    ///
    /// The divisor is the time spanned by the real samples in the window
    /// (at least one interval). Right after start the pair between the
    /// zero fill and the first real sample carries the whole cumulative
    /// count, so the first window's worth of output overstates the rate.
    /// A failed read between two ticks is not counted as elapsed time.
    pub fn on_tick(&mut self, totals: AggregateTotals) -> RateEstimate {
        if self.reseed {
            self.window = SampleWindow::filled(self.window.capacity(), totals);
            self.observed = 1;
            self.reseed = false;
            return RateEstimate::zero();
        }

        if let Some(newest) = self.window.newest() {
            let (_, regressed) = totals.delta_since(newest);
            if regressed {
                self.resets += 1;
                log::debug!(
                    "counter regression ({} -> {} rx, {} -> {} tx), clamping delta to zero",
                    newest.rx_bytes,
                    totals.rx_bytes,
                    newest.tx_bytes,
                    totals.tx_bytes
                );
            }
        }

        self.window.push(totals);
        self.observed = (self.observed + 1).min(self.window.capacity());

        let sum = sum_deltas(&self.window);
        let spans = self.observed.saturating_sub(1).max(1);
        let seconds = self.interval.as_secs_f64() * spans as f64;
        if seconds <= 0.0 {
            return RateEstimate::zero();
        }

        RateEstimate::new(sum.rx_bytes as f64 / seconds, sum.tx_bytes as f64 / seconds)
    }
}
