//! Error types for the `opgen` binary.

use opgen_core::OpgenError;
use thiserror::Error;

/// Errors surfaced by the `opgen` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Generation failed; validation issues have already been logged.
    #[error(transparent)]
    Generate(#[from] OpgenError),

    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
