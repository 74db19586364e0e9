pub mod collector;
pub mod estimator;
pub mod filter;
pub mod network;
pub mod procfs;

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain a tick's counters. Always recoverable: the tick
/// degrades to a zero estimate and the next one starts fresh.
#[derive(Error, Debug)]
pub enum CounterError {
    #[error("counter source {} is unavailable: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("counter source {} has no interface rows", .path.display())]
    Malformed { path: PathBuf },
}
