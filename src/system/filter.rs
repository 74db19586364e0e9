//! Interface filter: turns one raw counter row into an accepted sample,
//! or says why the row was left out of the totals.
//!
//! A row is split on runs of non-word characters, so both
//! `eth0: 123 ...` and `eth0:123 ...` yield `["eth0", "123", ...]`.
//! Received bytes are the 2nd field and transmitted bytes the 10th.

use thiserror::Error;

use crate::system::network::InterfaceSample;

/// Loopback interface name
pub const LOOPBACK: &str = "lo";

/// Prefixes of virtual, bridge and tunnel interfaces. A name is virtual
/// when it starts with one of these followed by at least one digit.
pub const VIRTUAL_PREFIXES: &[&str] = &["ifb", "lxdbr", "virbr", "br", "vnet", "tun", "tap"];

/// Minimum number of fields a usable row has
const MIN_FIELDS: usize = 10;
const RX_FIELD: usize = 1;
const TX_FIELD: usize = 9;

/// Why a row was excluded from the totals
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("malformed row: {0} fields")]
    Malformed(usize),
    #[error("loopback interface")]
    Loopback,
    #[error("virtual interface {0}")]
    Virtual(String),
    #[error("unparseable byte counter on {0}")]
    BadCounter(String),
}

/// Split a row into fields separated by runs of non-word characters
pub fn split_fields(row: &str) -> Vec<&str> {
    row.trim()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|field| !field.is_empty())
        .collect()
}

/// True for loopback and for names matching one of the virtual prefixes
pub fn is_excluded_name(name: &str) -> bool {
    name == LOOPBACK || is_virtual(name)
}

fn is_virtual(name: &str) -> bool {
    VIRTUAL_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
    })
}

/// Apply the exclusion rules to one raw row, in order: field count,
/// loopback, virtual prefix, counter parse.
pub fn parse_row(row: &str) -> Result<InterfaceSample, RowError> {
    let fields = split_fields(row);
    if fields.len() < MIN_FIELDS {
        return Err(RowError::Malformed(fields.len()));
    }

    let name = fields[0];
    if name == LOOPBACK {
        return Err(RowError::Loopback);
    }
    if is_virtual(name) {
        return Err(RowError::Virtual(name.to_string()));
    }

    match (fields[RX_FIELD].parse::<u64>(), fields[TX_FIELD].parse::<u64>()) {
        (Ok(rx_bytes), Ok(tx_bytes)) => Ok(InterfaceSample {
            name: name.to_string(),
            rx_bytes,
            tx_bytes,
        }),
        _ => Err(RowError::BadCounter(name.to_string())),
    }
}

/// Inclusion decision for a single row
pub fn is_included(row: &str) -> bool {
    parse_row(row).is_ok()
}

/// Parse every row of a counter table, keeping only accepted interfaces.
/// Rejected rows are skipped, never fatal.
pub fn accepted_samples<'a, I>(rows: I) -> Vec<InterfaceSample>
where
    I: IntoIterator<Item = &'a str>,
{
    rows.into_iter()
        .filter_map(|row| match parse_row(row) {
            Ok(sample) => Some(sample),
            Err(e) => {
                log::trace!("skipping counter row {:?}: {}", row.trim(), e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::network::AggregateTotals;

    fn row(name: &str, rx: &str, tx: &str) -> String {
        format!("{name}: {rx} 10 0 0 0 0 0 0 {tx} 5 0 0 0 0 0 0")
    }

    #[test]
    fn splits_on_non_word_runs() {
        assert_eq!(
            split_fields("  eth0:1234 5 |x"),
            vec!["eth0", "1234", "5", "x"]
        );
    }

    #[test]
    fn header_rows_are_rejected() {
        let header1 = "Inter-|   Receive                                                |  Transmit";
        let header2 = " face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed";
        assert_eq!(parse_row(header1), Err(RowError::Malformed(3)));
        assert_eq!(parse_row(header2), Err(RowError::BadCounter("face".into())));
    }

    #[test]
    fn short_row_is_malformed() {
        assert_eq!(parse_row("eth0: 1 2 3"), Err(RowError::Malformed(4)));
        assert!(!is_included(""));
    }

    #[test]
    fn loopback_is_excluded() {
        assert_eq!(parse_row(&row("lo", "999", "999")), Err(RowError::Loopback));
    }

    #[test]
    fn bridge_is_excluded_regardless_of_magnitude() {
        assert_eq!(
            parse_row(&row("br0", "18446744073709551615", "1")),
            Err(RowError::Virtual("br0".into()))
        );
    }

    #[test]
    fn virtual_prefixes_need_a_digit() {
        for name in ["ifb0", "lxdbr1", "virbr0", "br12", "vnet3", "tun0", "tap7"] {
            assert!(is_excluded_name(name), "{name} should be excluded");
        }
        for name in ["eth0", "wlan0", "bridge", "tunnel", "enp3s0", "brx0"] {
            assert!(!is_excluded_name(name), "{name} should be kept");
        }
    }

    #[test]
    fn garbage_counters_are_rejected() {
        assert!(!is_included(&row("eth0", "abc", "50")));
        assert_eq!(
            parse_row(&row("eth0", "100", "x1")),
            Err(RowError::BadCounter("eth0".into()))
        );
    }

    #[test]
    fn physical_and_loopback_rows_sum_to_physical_only() {
        let table = [row("eth0", "100", "50"), row("lo", "999", "999")];
        let samples = accepted_samples(table.iter().map(String::as_str));
        assert_eq!(samples.len(), 1);
        assert_eq!(AggregateTotals::from_samples(&samples), AggregateTotals::new(100, 50));
    }
}
