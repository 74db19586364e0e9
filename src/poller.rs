//! Fixed-cadence tick loop.
//!
//! Ticks run to completion on the calling thread and never overlap. If a
//! tick overruns its slot the missed deadlines are dropped rather than
//! replayed back to back.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

/// Shared flag that stops a [`Poller`] before its next tick
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct Poller {
    interval: Duration,
    cancel: CancelToken,
}

impl Poller {
    pub fn new(interval: Duration, cancel: CancelToken) -> Self {
        Self { interval, cancel }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run until cancelled or until `tick` breaks. The first tick fires
    /// immediately. Between ticks `wait` is handed the time left until
    /// the next deadline; it may return early (e.g. on a key press).
    /// Both callbacks get exclusive access to `state` in turn.
    pub fn run<S, W, T>(&self, state: &mut S, mut wait: W, mut tick: T) -> Result<()>
    where
        W: FnMut(&mut S, Duration) -> Result<()>,
        T: FnMut(&mut S) -> Result<ControlFlow<()>>,
    {
        let mut next = Instant::now();
        while !self.cancel.is_cancelled() {
            let now = Instant::now();
            if now >= next {
                if tick(state)?.is_break() {
                    break;
                }
                next += self.interval;
                let after = Instant::now();
                if next <= after {
                    next = after + self.interval;
                }
                continue;
            }
            wait(state, next - now)?;
        }
        Ok(())
    }
}
