//! Log subscriber setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` does not say otherwise.
pub fn default_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Install the global fmt subscriber. `RUST_LOG` overrides the default level.
pub fn init(debug: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(debug).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
