//! CLI argument parsing for calico-kicker.
//!
//! The sidecar has no subcommands: three optional flags tune the poll
//! cadence, the wait budget and the monitored interfaces.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

/// Default interval between readiness checks.
pub const DEFAULT_CHECK_INTERVAL: &str = "30s";

/// Default time allowed for the addresses to appear before the Pod is killed.
pub const DEFAULT_TERMINATION_TIMEOUT: &str = "3m";

/// Interfaces Calico creates for WireGuard encryption.
pub const DEFAULT_INTERFACE_NAMES: [&str; 2] = ["wireguard.cali", "wg-v6.cali"];

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("--{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Calico Kicker - deletes its own Pod when Calico interfaces never get addresses.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "calico-kicker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Interval at which to check for addresses.
    #[arg(long, default_value = DEFAULT_CHECK_INTERVAL, value_parser = parse_duration)]
    pub check_interval: Duration,

    /// Total amount of time to allow for the addresses to come available before killing the Pod.
    #[arg(long, default_value = DEFAULT_TERMINATION_TIMEOUT, value_parser = parse_duration)]
    pub termination_timeout: Duration,

    /// Comma-separated list of interface names to monitor, overriding the defaults.
    #[arg(long, value_delimiter = ',')]
    pub interface_names: Vec<String>,
}

impl Cli {
    /// Validate the arguments.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.check_interval.is_zero() {
            return Err(CliError::ZeroDuration("check-interval"));
        }
        if self.termination_timeout.is_zero() {
            return Err(CliError::ZeroDuration("termination-timeout"));
        }
        Ok(())
    }

    /// The interface names to monitor.
    ///
    /// Entries are trimmed, empty entries dropped and duplicates removed
    /// (first occurrence wins). An empty result falls back to
    /// `DEFAULT_INTERFACE_NAMES`.
    pub fn monitored_interfaces(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.interface_names.len());
        for name in self.interface_names.iter().map(|n| n.trim()) {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }

        if names.is_empty() {
            return DEFAULT_INTERFACE_NAMES.iter().map(|n| n.to_string()).collect();
        }
        names
    }
}

/// Parse a human-readable duration such as `30s`, `3m` or `1m30s`.
pub fn parse_duration(s: &str) -> Result<Duration, CliError> {
    humantime::parse_duration(s).map_err(|_| CliError::InvalidDuration(s.to_string()))
}

/// Parse CLI arguments from an iterator of strings.
/// Useful for testing.
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
