//! Library surface of the `opgen` command.
//!
//! The binary parses [`cli::Args`], installs logging and hands the request
//! to [`run`], which drives `opgen_core` and reports validation issues
//! through `tracing`.

pub mod cli;
pub mod error;
pub mod logging;

use camino::Utf8PathBuf;
use opgen_core::TracingReporter;

use crate::cli::Args;
use crate::error::CliError;

/// Generates the builders requested by `args` and returns the written path.
///
/// # Errors
///
/// Returns [`CliError::Generate`] when loading, validation, rendering or
/// writing fails.
pub fn run(args: &Args) -> Result<Utf8PathBuf, CliError> {
    let request = args.to_request();
    tracing::debug!(
        source = %request.source,
        dest = %request.dest,
        types = request.types.len(),
        "starting generation"
    );
    Ok(opgen_core::generate(&request, &mut TracingReporter)?)
}
