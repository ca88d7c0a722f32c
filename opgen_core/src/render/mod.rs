//! Rendering of builder models into a generated Rust source file.
//!
//! [`RustRenderer`] accumulates template lines and imports in memory;
//! nothing touches the filesystem until the finished text is handed to the
//! writer, so a failed render never leaves a partial file behind.

mod builder;
mod imports;
mod template;
mod types;

use thiserror::Error;

use crate::names::ModulePath;

pub use builder::render_builder;
pub use imports::ImportTable;
pub use types::{Elision, TypeFormatter};

/// Version stamped into the header of generated files.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised while expanding template lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A positional placeholder has no matching argument.
    #[error("template `{template}` has no argument ${index}")]
    MissingArgument {
        /// Offending template line.
        template: String,
        /// Placeholder index.
        index: usize,
    },
    /// A named placeholder refers to a path that was never imported.
    #[error("template `{template}` refers to `{path}`, which is not imported")]
    UnknownImport {
        /// Offending template line.
        template: String,
        /// Path named by the placeholder.
        path: String,
    },
    /// A `$` is not followed by a digit, `{` or `$`.
    #[error("template `{template}` has a malformed placeholder at byte {offset}")]
    MalformedPlaceholder {
        /// Offending template line.
        template: String,
        /// Byte offset of the `$`.
        offset: usize,
    },
    /// A setter name cannot be written as an identifier, not even a raw one.
    #[error("setter name `{0}` is a reserved identifier")]
    ReservedSetter(String),
    /// An option refers to a source file the package does not contain.
    #[error("option `{0}` has no source file")]
    MissingSourceFile(String),
}

/// In-memory buffer of a generated Rust file.
#[derive(Debug, Clone, Default)]
pub struct RustRenderer {
    imports: ImportTable,
    body: String,
}

impl RustRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands `template` with `args` and appends it as one line.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when a placeholder cannot be expanded.
    pub fn line(&mut self, template: &str, args: &[&str]) -> Result<(), RenderError> {
        let text = template::expand(template, args, &self.imports)?;
        self.body.push_str(&text);
        self.body.push('\n');
        Ok(())
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.body.push('\n');
    }

    /// Imports `path`, preferably as `preferred`, and returns its alias.
    pub fn import_as(&mut self, path: &str, preferred: &str) -> String {
        self.imports.import(path, preferred)
    }

    /// Mutable access to the import table, for type formatting.
    pub const fn imports_mut(&mut self) -> &mut ImportTable {
        &mut self.imports
    }

    /// Assembles the header, the imports and the body into file contents.
    #[must_use]
    pub fn finish(self) -> String {
        let mut out =
            format!("// Code generated by opgen version {GENERATOR_VERSION}. DO NOT EDIT.\n\n");
        if !self.imports.is_empty() {
            out.push_str(&self.imports.render());
            out.push('\n');
        }
        out.push_str(self.body.trim_end());
        out.push('\n');
        out
    }
}

/// Imports the module at `path` and returns the alias to reference it by.
///
/// The crate root has no last segment to reuse and is imported as `root`.
pub(crate) fn module_alias(imports: &mut ImportTable, path: &ModulePath) -> String {
    let preferred = if path.segments().len() > 1 {
        path.last()
    } else {
        "root"
    };
    imports.import(&path.to_string(), preferred)
}

#[cfg(test)]
mod tests {
    //! Unit tests for the renderer buffer.

    use super::*;

    #[test]
    fn finish_places_imports_between_header_and_body() -> Result<(), RenderError> {
        let mut renderer = RustRenderer::new();
        let alias = renderer.import_as("crate::internal::options", "options");
        renderer.line("const A: u8 = ${crate::internal::options}::$0;", &["A"])?;
        renderer.blank();
        renderer.line("// $$ done", &[])?;

        assert_eq!(alias, "options");
        assert_eq!(
            renderer.finish(),
            format!(
                "// Code generated by opgen version {GENERATOR_VERSION}. DO NOT EDIT.\n\n\
                 use crate::internal::options;\n\n\
                 const A: u8 = options::A;\n\n// $ done\n"
            )
        );
        Ok(())
    }

    #[test]
    fn crate_root_module_is_imported_as_root() {
        let mut imports = ImportTable::default();
        let root: ModulePath = "crate".parse().expect("module path");
        let nested: ModulePath = "crate::internal::options".parse().expect("module path");
        assert_eq!(module_alias(&mut imports, &root), "root");
        assert_eq!(module_alias(&mut imports, &nested), "options");
        assert_eq!(
            imports.render(),
            "use crate as root;\nuse crate::internal::options;\n"
        );
    }
}
