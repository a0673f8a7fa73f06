//! Diagnostic tracing for the command-line runner.
//!
//! Output goes to stderr so it never mixes with the row counts printed on
//! stdout or the exported tables.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the level follows `-v`: `warn` by
/// default, `info` for one flag, `debug` for two or more.
///
/// # Example
/// ```bash
/// RUST_LOG=cohort_ladder_core=debug cohort-ladder run --luck 0.5
/// ```
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
