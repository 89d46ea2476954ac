//! Log output for the command-line tools
//!
//! The library logs through the `log` facade; the subscriber installed here
//! bridges those records and writes them to stderr so they never mix with
//! dialogue on stdout. `RUST_LOG` overrides the default level.

use log::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber with `level` as the default filter
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    let default = level.to_string().to_lowercase();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install logger: {}", err))
}
