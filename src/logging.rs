//! Logging setup.
//!
//! Diagnostics go to stderr so stdout stays clean for `--json` output.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding an `EnvFilter` directive, e.g. `debug` or
/// `issueflow_lib=trace`. Overrides `-v`/`-q` when set.
pub const LOG_ENV: &str = "ISSUEFLOW_LOG";

/// Map `-v`/`-q` to a default filter directive.
#[must_use]
pub const fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if `ISSUEFLOW_LOG` holds an invalid directive or a
/// subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool, json: bool) -> Result<()> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive)
            .map_err(|e| anyhow!("invalid {LOG_ENV} directive: {e}"))?,
        _ => EnvFilter::new(default_level(verbose, quiet)),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
