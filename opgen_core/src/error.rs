//! Error types for the option mapping and rendering pipeline.
//!
//! Setup failures (bad input names, missing or ambiguous modules, parse
//! errors) abort immediately. Validation problems are collected first and
//! surface together as [`OpgenError::Validation`].

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::issues::AggregatedIssues;
use crate::render::RenderError;

/// Errors surfaced by the `opgen` pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpgenError {
    /// A requested target type is not a plain Rust identifier.
    #[error("invalid type name '{0}'")]
    InvalidTypeName(String),

    /// The destination does not name a Rust source file.
    #[error("invalid rust file name '{0}'")]
    InvalidDestination(String),

    /// A module path supplied by the caller could not be parsed.
    #[error("invalid module path '{0}'")]
    InvalidModulePath(String),

    /// Neither `<path>.rs` nor `<path>/mod.rs` exists.
    #[error("no module '{0}' found")]
    PackageNotFound(Utf8PathBuf),

    /// Both module layouts exist for the same path.
    #[error("module '{path}' is ambiguous: both {file} and {mod_file} exist")]
    AmbiguousPackage {
        /// Path as supplied by the caller.
        path: Utf8PathBuf,
        /// The `<path>.rs` candidate.
        file: Utf8PathBuf,
        /// The `<path>/mod.rs` candidate.
        mod_file: Utf8PathBuf,
    },

    /// The module path could not be derived from the file location.
    #[error("cannot derive module path for {0}; pass --module explicitly")]
    UnknownModulePath(Utf8PathBuf),

    /// The module source failed to parse.
    #[error("failed to parse {path}:{line}:{column}: {source}")]
    Parse {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// 1-based line of the parse error.
        line: usize,
        /// 1-based column of the parse error.
        column: usize,
        /// Underlying parser error.
        #[source]
        source: syn::Error,
    },

    /// Filesystem access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Rendering a builder failed.
    #[error("render {phase} for type {type_name}: {source}")]
    Render {
        /// Target type being rendered.
        type_name: String,
        /// Rendering phase that failed.
        phase: &'static str,
        /// Underlying rendering error.
        #[source]
        source: RenderError,
    },

    /// One or more validation issues were reported.
    #[error("generation failed: {0}")]
    Validation(AggregatedIssues),
}

impl OpgenError {
    /// Builds an I/O error bound to `path`.
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results in this crate.
pub type Result<T, E = OpgenError> = std::result::Result<T, E>;
