//! Counter reader for the Linux `/proc/net/dev` table.
//!
//! ```text
//! Inter-|   Receive                                                |  Transmit
//!  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
//!     lo: 2776770   11307    0    0    0     0          0         0  2776770   11307    0    0    0     0       0          0
//!   eth0: 1215645    2751    0    0    0     0          0         0  1782404    4324    0    0    0     0       0          0
//! ```

use std::fs;
use std::path::PathBuf;

use crate::system::collector::CounterSource;
use crate::system::filter;
use crate::system::network::InterfaceSample;
use crate::system::CounterError;

/// Default location of the kernel's per-interface counter table
pub const PROC_NET_DEV: &str = "/proc/net/dev";

pub struct ProcNetDev {
    path: PathBuf,
    label: String,
}

impl ProcNetDev {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }

    /// Raw rows in the order the kernel reports them, headers included.
    pub fn read_rows(&self) -> Result<Vec<String>, CounterError> {
        let content = fs::read_to_string(&self.path).map_err(|source| {
            CounterError::SourceUnavailable {
                path: self.path.clone(),
                source,
            }
        })?;

        // Every interface row carries a "name:" prefix; a table without
        // a single one is not a counter table.
        if !content.lines().any(|line| line.contains(':')) {
            return Err(CounterError::Malformed {
                path: self.path.clone(),
            });
        }

        Ok(content.lines().map(str::to_string).collect())
    }
}

impl Default for ProcNetDev {
    fn default() -> Self {
        Self::new(PROC_NET_DEV)
    }
}

impl CounterSource for ProcNetDev {
    fn name(&self) -> &str {
        &self.label
    }

    fn read(&mut self) -> Result<Vec<InterfaceSample>, CounterError> {
        let rows = self.read_rows()?;
        Ok(filter::accepted_samples(rows.iter().map(String::as_str)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 2776770   11307    0    0    0     0          0         0  2776770   11307    0    0    0     0       0          0
  eth0: 1215645    2751    0    0    0     0          0         0  1782404    4324    0    0    0     0       0          0
 wlan0:4000 10 0 0 0 0 0 0 6000 12 0 0 0 0 0 0
virbr0:  999999    99    0    0    0     0          0         0   999999      99    0    0    0     0       0          0
";

    fn table_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_rows_in_kernel_order() {
        let file = table_file(TABLE);
        let source = ProcNetDev::new(file.path());
        let rows = source.read_rows().unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows[3].trim_start().starts_with("eth0:"));
    }

    #[test]
    fn keeps_only_physical_interfaces() {
        let file = table_file(TABLE);
        let mut source = ProcNetDev::new(file.path());
        let samples = source.read().unwrap();
        let names: Vec<&str> = samples.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["eth0", "wlan0"]);
        assert_eq!(samples[0].rx_bytes, 1215645);
        assert_eq!(samples[0].tx_bytes, 1782404);
        assert_eq!(samples[1].rx_bytes, 4000);
        assert_eq!(samples[1].tx_bytes, 6000);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = ProcNetDev::new(dir.path().join("nope"));
        assert!(matches!(
            source.read(),
            Err(CounterError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn table_without_interfaces_is_malformed() {
        let file = table_file("garbage\nmore garbage\n");
        let mut source = ProcNetDev::new(file.path());
        assert!(matches!(source.read(), Err(CounterError::Malformed { .. })));
    }
}
