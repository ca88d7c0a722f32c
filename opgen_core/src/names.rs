//! Validated names supplied by the caller: target type names, the
//! destination file, and module paths.

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::OpgenError;

/// A target type name; always a plain, non-keyword Rust identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeName(String);

impl TypeName {
    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TypeName {
    type Err = OpgenError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        match syn::parse_str::<syn::Ident>(trimmed) {
            Ok(ident) if ident != "_" => Ok(Self(ident.to_string())),
            _ => Err(OpgenError::InvalidTypeName(raw.to_owned())),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destination path of the generated source file; always ends in `.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestFile(Utf8PathBuf);

impl DestFile {
    /// Returns the destination path.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }
}

impl FromStr for DestFile {
    type Err = OpgenError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let path = Utf8PathBuf::from(raw);
        let has_stem = path.file_stem().is_some_and(|stem| !stem.is_empty());
        if path.extension() == Some("rs") && has_stem {
            Ok(Self(path))
        } else {
            Err(OpgenError::InvalidDestination(raw.to_owned()))
        }
    }
}

impl fmt::Display for DestFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `::`-separated module path such as `crate::internal::options`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModulePath(Vec<String>);

impl ModulePath {
    /// The crate root, `crate`.
    #[must_use]
    pub fn crate_root() -> Self {
        Self(vec!["crate".to_owned()])
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the final segment.
    #[must_use]
    pub fn last(&self) -> &str {
        self.0.last().map_or("crate", String::as_str)
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_owned());
        Self(segments)
    }

    /// Returns the parent path, or `None` at a root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self(rest.to_vec())),
            _ => None,
        }
    }
}

impl FromStr for ModulePath {
    type Err = OpgenError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || OpgenError::InvalidModulePath(raw.to_owned());
        let path = syn::parse_str::<syn::Path>(raw.trim()).map_err(|_| invalid())?;
        if path.leading_colon.is_some() {
            return Err(invalid());
        }
        let mut segments = Vec::with_capacity(path.segments.len());
        for segment in &path.segments {
            if !segment.arguments.is_none() {
                return Err(invalid());
            }
            segments.push(segment.ident.to_string());
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("::"))
    }
}
