//! Engine behind `opgen`, a generator of functional-options builders.
//!
//! Given a Rust module and a list of target type names, `opgen_core` finds
//! the module-level `const`, `static` and `fn` items named after each type
//! (`ExampleName` belongs to `Example`), validates them, and renders one
//! builder per type into a file meant to be `include!`d next to the type.
//!
//! ```rust,no_run
//! # use opgen_core::{GenerateRequest, OpgenError, TracingReporter};
//! # fn main() -> Result<(), OpgenError> {
//! let request = GenerateRequest {
//!     source: "src/internal/options.rs".into(),
//!     dest: "src/example_options.rs".parse()?,
//!     module: None,
//!     types: vec!["Example".parse()?],
//! };
//! let written = opgen_core::generate(&request, &mut TracingReporter)?;
//! # let _ = written;
//! # Ok(())
//! # }
//! ```

mod comments;
mod error;
mod generate;
mod issues;
mod mapping;
mod model;
mod names;
mod owner;
mod package;
pub mod render;
mod symbols;

pub use comments::{CommentExtractor, normalize_doc_lines};
pub use error::{OpgenError, Result};
pub use generate::{GenerateRequest, generate, render_package};
pub use issues::{
    AggregatedIssues, CollectingReporter, Reporter, TracingReporter, UntypedKind, ValidationIssue,
};
pub use mapping::{OptionItem, OptionKind, OptionMapping, TargetType, map_options};
pub use model::{BuilderDefault, BuilderModel, BuilderOption};
pub use names::{DestFile, ModulePath, TypeName};
pub use owner::owner;
pub use package::{
    DeclId, FileScope, ScopedName, SourceFile, SourcePackage, SourcePosition, derive_module_path,
    load_package, resolve_module_file,
};
pub use symbols::{ConstType, FnType, Symbol, SymbolKind, SymbolTable, collect_names};
