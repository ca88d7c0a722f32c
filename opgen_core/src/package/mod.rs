//! Loading of the source module that declares the option items.
//!
//! A "package" here is one Rust module file together with its module path.
//! Loading resolves the file, parses it with span locations enabled, and
//! keeps the syntax tree around for symbol collection and doc lookup.

mod path;
mod scope;

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::{OpgenError, Result};
use crate::names::ModulePath;

pub use path::{derive_module_path, resolve_module_file};
pub use scope::{FileScope, ScopedName};

/// File and line of a declaration, used for messages and doc lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// File containing the declaration.
    pub file: Utf8PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl SourcePosition {
    /// Builds a position from a span inside `file`.
    #[must_use]
    pub fn from_span(file: &Utf8Path, span: proc_macro2::Span) -> Self {
        let start = span.start();
        Self {
            file: file.to_path_buf(),
            line: start.line,
            column: start.column + 1,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Structural handle to a top-level item: file index and item index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId {
    /// Index into [`SourcePackage::files`].
    pub file: usize,
    /// Index into the file's top-level items.
    pub item: usize,
}

/// One parsed source file.
#[derive(Debug)]
pub struct SourceFile {
    path: Utf8PathBuf,
    syntax: syn::File,
}

impl SourceFile {
    /// Parses `source` as the contents of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`OpgenError::Parse`] when the source is not valid Rust.
    pub fn parse(path: impl Into<Utf8PathBuf>, source: &str) -> Result<Self> {
        let file_path = path.into();
        match syn::parse_file(source) {
            Ok(syntax) => Ok(Self {
                path: file_path,
                syntax,
            }),
            Err(err) => {
                let start = err.span().start();
                Err(OpgenError::Parse {
                    path: file_path,
                    line: start.line,
                    column: start.column + 1,
                    source: err,
                })
            }
        }
    }

    /// Path the file was read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Parsed syntax tree.
    #[must_use]
    pub const fn syntax(&self) -> &syn::File {
        &self.syntax
    }

    /// Looks up a top-level item by index.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&syn::Item> {
        self.syntax.items.get(index)
    }
}

/// The loaded source module: its path within the crate and its files.
#[derive(Debug)]
pub struct SourcePackage {
    module_path: ModulePath,
    files: Vec<SourceFile>,
}

impl SourcePackage {
    /// Assembles a package from already parsed files.
    #[must_use]
    pub const fn new(module_path: ModulePath, files: Vec<SourceFile>) -> Self {
        Self { module_path, files }
    }

    /// Module path used to reference items from generated code.
    #[must_use]
    pub const fn module_path(&self) -> &ModulePath {
        &self.module_path
    }

    /// Files in traversal order.
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Looks up a file by index.
    #[must_use]
    pub fn file(&self, index: usize) -> Option<&SourceFile> {
        self.files.get(index)
    }

    /// Resolves a declaration handle to its item.
    #[must_use]
    pub fn item(&self, decl: DeclId) -> Option<&syn::Item> {
        self.file(decl.file).and_then(|file| file.item(decl.item))
    }
}

/// Loads the module at `source`.
///
/// `source` is either a `.rs` file or a module path without extension that
/// resolves to `<source>.rs` or `<source>/mod.rs`. When `module` is `None`
/// the module path is derived from the file location.
///
/// # Errors
///
/// Fails when the module cannot be found, is ambiguous, cannot be read or
/// parsed, or when its module path cannot be derived.
pub fn load_package(source: &Utf8Path, module: Option<&ModulePath>) -> Result<SourcePackage> {
    let file_path = resolve_module_file(source)?;
    let module_path = match module {
        Some(explicit) => explicit.clone(),
        None => derive_module_path(&file_path)?,
    };

    let text = read_source(&file_path)?;
    let file = SourceFile::parse(file_path.clone(), &text)?;
    tracing::debug!(
        file = %file_path,
        module = %module_path,
        items = file.syntax().items.len(),
        "loaded source module"
    );

    Ok(SourcePackage::new(module_path, vec![file]))
}

fn read_source(path: &Utf8Path) -> Result<String> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| OpgenError::PackageNotFound(path.to_path_buf()))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| OpgenError::io(parent, err))?;
    dir.read_to_string(name)
        .map_err(|err| OpgenError::io(path, err))
}
