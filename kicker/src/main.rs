//! calico-kicker binary.
//!
//! Entry point for the readiness sidecar.

use std::convert::Infallible;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use kicker::exit::exit_code;
use kicker::{logging, Cli, KickerConfig, PollLoop, RealSleeper, StartupError};
use kicker_clock::MonotonicClock;
use kicker_kube::KubePodTerminator;
use kicker_netlink::RtnetlinkEnumerator;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match KickerConfig::from_cli(&cli, |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            let e = StartupError::from(e);
            eprintln!("error: {e}");
            return ExitCode::from(exit_code(&e));
        }
    };

    logging::init(config.debug);

    match run(&config) {
        Ok(never) => match never {},
        Err(e) => {
            error!(error = %e, "failed to start address monitor");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Open the providers and hand control to the poll loop, which never returns.
fn run(config: &KickerConfig) -> Result<Infallible, StartupError> {
    let runtime = Arc::new(
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?,
    );

    let enumerator = RtnetlinkEnumerator::connect(Arc::clone(&runtime))?;
    let terminator = KubePodTerminator::new(runtime);

    info!(
        interfaces = ?config.interface_names,
        check_interval = %humantime::format_duration(config.check_interval),
        termination_timeout = %humantime::format_duration(config.termination_timeout),
        pod_namespace = %config.identity.namespace,
        "starting address monitor"
    );

    let mut poll = PollLoop::new(config, enumerator, terminator, MonotonicClock::new());
    poll.run(&RealSleeper::new())
}
