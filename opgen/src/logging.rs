//! Log subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::error::CliError;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "OPGEN_LOG";

/// Installs a stderr subscriber filtered by `OPGEN_LOG`, defaulting to
/// `info`.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when a global subscriber is already
/// installed.
pub fn init() -> Result<(), CliError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}
