use std::io::{self, Stdout, Write};

use anyhow::Result;
use chrono::Local;

use super::DisplaySink;

/// Prints "HH:MM:SS <label>" whenever the label changes. Used when stdout
/// is not a terminal (pipes, status-bar scripts, log files).
pub struct LineSink<W: Write> {
    out: W,
    last: Option<String>,
}

impl LineSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for LineSink<W> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.last.as_deref() == Some(text) {
            return Ok(());
        }
        writeln!(self.out, "{} {}", Local::now().format("%H:%M:%S"), text)?;
        self.out.flush()?;
        self.last = Some(text.to_string());
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(output: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(output)
            .lines()
            // Drop the "HH:MM:SS " prefix
            .map(|line| line.split_once(' ').map(|(_, rest)| rest.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn writes_only_on_change() {
        let mut sink = LineSink::new(Vec::new());
        for text in ["-", "-", "↓ 2 KiB/s", "↓ 2 KiB/s", "-"] {
            sink.set_text(text).unwrap();
        }
        sink.destroy().unwrap();
        assert_eq!(labels(&sink.into_inner()), vec!["-", "↓ 2 KiB/s", "-"]);
    }

    #[test]
    fn lines_carry_a_timestamp() {
        let mut sink = LineSink::new(Vec::new());
        sink.set_text("↑ 1 MiB/s").unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let (stamp, _) = out.split_once(' ').unwrap();
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
    }
}
