//! Command-line interface definitions for `opgen`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use opgen_core::{DestFile, GenerateRequest, ModulePath, TypeName};

/// Parsed CLI arguments for `opgen`.
#[derive(Debug, Parser)]
#[command(name = "opgen")]
#[command(about = "Generate functional-options builders for Rust types")]
#[command(version, disable_version_flag = true)]
pub struct Args {
    /// Module holding the option declarations: a `.rs` file, or a module
    /// path resolving to `<path>.rs` or `<path>/mod.rs`.
    #[arg(short, long, env = "OPGEN_SOURCE", value_name = "path")]
    pub source: Utf8PathBuf,
    /// Generated Rust file to write.
    #[arg(short, long, env = "OPGEN_DEST", value_name = "file.rs")]
    pub dest: DestFile,
    /// Module path of the source module, such as `crate::internal::options`.
    /// Derived from the location below `src/` when omitted.
    #[arg(short, long, env = "OPGEN_MODULE", value_name = "path")]
    pub module: Option<ModulePath>,
    /// Print version information and exit.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
    /// Target types to generate builders for; earlier types win shared
    /// prefixes.
    #[arg(required = true, value_name = "TYPE")]
    pub types: Vec<TypeName>,
}

impl Args {
    /// Converts the arguments into a generation request.
    #[must_use]
    pub fn to_request(&self) -> GenerateRequest {
        GenerateRequest {
            source: self.source.clone(),
            dest: self.dest.clone(),
            module: self.module.clone(),
            types: self.types.clone(),
        }
    }
}
