//! Temporary crate layouts for generator tests.
//!
//! # Examples
//!
//! ```
//! use test_helpers::ModuleTree;
//!
//! let tree = ModuleTree::new().expect("create tree");
//! let path = tree
//!     .write("src/internal/options.rs", "pub const ExampleName: &str = \"x\";\n")
//!     .expect("write module");
//! assert!(path.ends_with("src/internal/options.rs"));
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tempfile::TempDir;

/// Options module declaring one default constant, one default function and
/// one explicit-only static for the `Example` type.
pub const EXAMPLE_OPTIONS: &str = r#"use std::io::Error;

/// ExampleName sets example name.
pub const ExampleName: &str = "example";

/// ExampleLogger sets a logger for an example.
pub fn ExampleLogger(err: Error) {
    drop(err);
}

/// ExampleSize caps the example size.
pub static ExampleSize: i64 = 0;
"#;

/// A crate-like directory tree that is removed on drop.
#[derive(Debug)]
pub struct ModuleTree {
    root: Utf8PathBuf,
    dir: Dir,
    _temp: TempDir,
}

impl ModuleTree {
    /// Creates an empty tree in a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open {root}"))?;
        Ok(Self {
            root,
            dir,
            _temp: temp,
        })
    }

    /// Absolute path of the tree root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Writes `contents` to `relative`, creating parent directories, and
    /// returns the absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        if let Some(parent) = Utf8Path::new(relative).parent()
            && !parent.as_str().is_empty()
        {
            self.dir
                .create_dir_all(parent)
                .with_context(|| format!("create {parent}"))?;
        }
        self.dir
            .write(relative, contents)
            .with_context(|| format!("write {relative}"))?;
        Ok(self.path(relative))
    }

    /// Reads `relative` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable.
    pub fn read(&self, relative: &str) -> Result<String> {
        self.dir
            .read_to_string(relative)
            .with_context(|| format!("read {relative}"))
    }

    /// Whether `relative` exists inside the tree.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.dir.exists(relative)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for module tree fixtures.

    use super::*;

    #[test]
    fn writes_nested_files() -> Result<()> {
        let tree = ModuleTree::new()?;
        let path = tree.write("src/internal/mod.rs", "pub mod options;\n")?;
        anyhow::ensure!(path == tree.root().join("src/internal/mod.rs"));
        anyhow::ensure!(tree.exists("src/internal/mod.rs"));
        anyhow::ensure!(!tree.exists("src/internal/options.rs"));
        anyhow::ensure!(tree.read("src/internal/mod.rs")? == "pub mod options;\n");
        Ok(())
    }
}
