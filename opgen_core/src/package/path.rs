//! Module file resolution and module path derivation.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use crate::error::{OpgenError, Result};
use crate::names::ModulePath;

/// Resolves `source` to the file holding the module.
///
/// A path ending in `.rs` is used as is. Otherwise both `<source>.rs` and
/// `<source>/mod.rs` are probed, mirroring how the compiler resolves
/// `mod source;`.
///
/// # Errors
///
/// Returns [`OpgenError::PackageNotFound`] when no candidate exists and
/// [`OpgenError::AmbiguousPackage`] when both do.
pub fn resolve_module_file(source: &Utf8Path) -> Result<Utf8PathBuf> {
    if source.extension() == Some("rs") {
        return if source.is_file() {
            Ok(source.to_path_buf())
        } else {
            Err(OpgenError::PackageNotFound(source.to_path_buf()))
        };
    }

    let trimmed = source.as_str().trim_end_matches('/');
    let file = Utf8PathBuf::from(format!("{trimmed}.rs"));
    let mod_file = Utf8Path::new(trimmed).join("mod.rs");
    match (file.is_file(), mod_file.is_file()) {
        (true, false) => Ok(file),
        (false, true) => Ok(mod_file),
        (true, true) => Err(OpgenError::AmbiguousPackage {
            path: source.to_path_buf(),
            file,
            mod_file,
        }),
        (false, false) => Err(OpgenError::PackageNotFound(source.to_path_buf())),
    }
}

/// Derives the module path of `file` from its location below `src/`.
///
/// `src/lib.rs` and `src/main.rs` map to `crate`; `mod.rs` stands for its
/// directory.
///
/// # Errors
///
/// Returns [`OpgenError::UnknownModulePath`] when the file does not live
/// under a `src` directory or a component is not a valid identifier.
pub fn derive_module_path(file: &Utf8Path) -> Result<ModulePath> {
    let absolute = file
        .canonicalize_utf8()
        .unwrap_or_else(|_| file.to_path_buf());
    let unknown = || OpgenError::UnknownModulePath(file.to_path_buf());

    let components: Vec<&str> = absolute
        .components()
        .filter_map(|component| match component {
            Utf8Component::Normal(name) => Some(name),
            _ => None,
        })
        .collect();
    let src_index = components
        .iter()
        .rposition(|name| *name == "src")
        .ok_or_else(unknown)?;
    let relative = components.get(src_index + 1..).unwrap_or_default();

    let Some((file_name, dirs)) = relative.split_last() else {
        return Err(unknown());
    };
    let stem = file_name.strip_suffix(".rs").ok_or_else(unknown)?;

    let mut path = ModulePath::crate_root();
    for dir in dirs {
        path = path.join(checked_segment(dir).ok_or_else(unknown)?);
    }
    match (stem, dirs.is_empty()) {
        ("lib" | "main", true) | ("mod", false) => {}
        ("mod", true) => return Err(unknown()),
        (name, _) => path = path.join(checked_segment(name).ok_or_else(unknown)?),
    }
    Ok(path)
}

fn checked_segment(raw: &str) -> Option<&str> {
    syn::parse_str::<syn::Ident>(raw).ok().map(|_| raw)
}

#[cfg(test)]
mod tests {
    //! Unit tests for module path derivation.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::lib("/work/demo/src/lib.rs", "crate")]
    #[case::main("/work/demo/src/main.rs", "crate")]
    #[case::file("/work/demo/src/options.rs", "crate::options")]
    #[case::nested("/work/demo/src/internal/options.rs", "crate::internal::options")]
    #[case::mod_file("/work/demo/src/internal/options/mod.rs", "crate::internal::options")]
    #[case::innermost_src("/src/demo/src/options.rs", "crate::options")]
    fn derives_module_paths(#[case] file: &str, #[case] expected: &str) {
        let path = derive_module_path(Utf8Path::new(file)).expect("derivable module path");
        assert_eq!(path.to_string(), expected);
    }

    #[rstest]
    #[case::outside_src("/work/demo/options.rs")]
    #[case::src_mod("/work/demo/src/mod.rs")]
    #[case::bad_ident("/work/demo/src/my-options.rs")]
    fn rejects_underivable_paths(#[case] file: &str) {
        assert!(matches!(
            derive_module_path(Utf8Path::new(file)),
            Err(OpgenError::UnknownModulePath(_))
        ));
    }
}
