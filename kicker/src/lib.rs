//! Calico Kicker.
//!
//! Readiness sidecar that waits for the Calico WireGuard interfaces to get
//! their addresses and deletes its own Pod if they never do, so the
//! orchestrator can reschedule it.

pub mod cli;
pub mod config;
pub mod exit;
pub mod logging;
pub mod poll;
pub mod readiness;
pub mod sleeper;
pub mod terminate;

pub use cli::{parse_from, Cli, CliError, DEFAULT_INTERFACE_NAMES};
pub use config::{KickerConfig, WorkloadIdentity, DEFAULT_POD_NAMESPACE};
pub use poll::{idle_forever, LoopState, PollLoop, IDLE_INTERVAL};
pub use readiness::ReadinessEvaluator;
pub use sleeper::{MockSleeper, RealSleeper, Sleeper};
pub use terminate::{TerminationOutcome, TerminationTrigger, DELETION_GRACE_PERIOD_SECS};

use kicker_netlink::NetlinkError;
use thiserror::Error;

/// Errors that stop the sidecar before the poll loop starts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CliError),

    #[error("failed to build async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("failed to create netlink connection: {0}")]
    Netlink(#[from] NetlinkError),
}
