//! Runtime configuration.
//!
//! `KickerConfig` is assembled once at startup from the parsed CLI and the
//! process environment, then handed to the poll loop by reference. Nothing
//! downstream reads the environment.

use std::time::Duration;

use crate::cli::{Cli, CliError};

/// Environment variable enabling debug logging.
pub const ENV_DEBUG: &str = "DEBUG";

/// Environment variable carrying the Pod namespace (downward API).
pub const ENV_POD_NAMESPACE: &str = "POD_NAMESPACE";

/// Environment variable carrying the Pod name (downward API).
pub const ENV_POD_NAME: &str = "POD_NAME";

/// Namespace assumed when `POD_NAMESPACE` is unset.
pub const DEFAULT_POD_NAMESPACE: &str = "calico";

/// The Pod this process runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadIdentity {
    pub namespace: String,
    /// `None` disables self-termination.
    pub name: Option<String>,
}

impl WorkloadIdentity {
    /// Read the identity through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            namespace: non_empty(ENV_POD_NAMESPACE)
                .unwrap_or_else(|| DEFAULT_POD_NAMESPACE.to_string()),
            name: non_empty(ENV_POD_NAME),
        }
    }
}

/// Immutable configuration for one run of the sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickerConfig {
    /// Interval between readiness checks.
    pub check_interval: Duration,
    /// Wait budget before the Pod is deleted.
    pub termination_timeout: Duration,
    /// Interfaces that must each carry an address.
    pub interface_names: Vec<String>,
    /// Pod to delete on expiry.
    pub identity: WorkloadIdentity,
    /// Debug logging toggle.
    pub debug: bool,
}

impl KickerConfig {
    /// Build the configuration from validated CLI arguments and an
    /// environment lookup (normally `std::env::var(..).ok()`).
    pub fn from_cli<F>(cli: &Cli, lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        cli.validate()?;

        Ok(Self {
            check_interval: cli.check_interval,
            termination_timeout: cli.termination_timeout,
            interface_names: cli.monitored_interfaces(),
            debug: lookup(ENV_DEBUG)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false),
            identity: WorkloadIdentity::from_lookup(lookup),
        })
    }
}

/// Parse a boolean toggle: `1 t T TRUE true True` or `0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
