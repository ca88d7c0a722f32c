//! End-to-end generation: load, map, render, write.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::{OpgenError, Result};
use crate::issues::Reporter;
use crate::mapping::{TargetType, map_options};
use crate::model::BuilderModel;
use crate::names::{DestFile, ModulePath, TypeName};
use crate::package::{FileScope, SourcePackage, load_package};
use crate::render::{RustRenderer, render_builder};
use crate::symbols::SymbolTable;

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Module file, or module path without extension.
    pub source: Utf8PathBuf,
    /// Generated file to write.
    pub dest: DestFile,
    /// Module path of the source, derived from `source` when absent.
    pub module: Option<ModulePath>,
    /// Target types, in priority order for ownership.
    pub types: Vec<TypeName>,
}

/// Runs a full generation and returns the path written.
///
/// # Errors
///
/// Returns setup errors from loading, [`OpgenError::Validation`] with every
/// issue reported to `reporter`, render errors, or I/O errors from
/// writing. The destination is left untouched on any error.
pub fn generate(request: &GenerateRequest, reporter: &mut dyn Reporter) -> Result<Utf8PathBuf> {
    let package = load_package(&request.source, request.module.as_ref())?;
    let contents = render_package(&package, &request.types, reporter)?;
    let written = write_output(request.dest.as_path(), &contents)?;
    tracing::info!(
        path = %written,
        types = request.types.len(),
        "wrote generated builders"
    );
    Ok(written)
}

/// Maps and renders `package` into the text of a generated file.
///
/// Builders are emitted in sorted type order so the output does not
/// depend on the order types were requested in.
///
/// # Errors
///
/// Returns [`OpgenError::Validation`] or [`OpgenError::Render`].
pub fn render_package(
    package: &SourcePackage,
    types: &[TypeName],
    reporter: &mut dyn Reporter,
) -> Result<String> {
    let table = SymbolTable::build(package);
    tracing::debug!(symbols = table.len(), "built symbol table");
    let mapping = map_options(package, &table, types, reporter)?;

    let mut renderer = RustRenderer::new();
    let mut targets: Vec<&TargetType> = mapping.targets().iter().collect();
    targets.sort_by(|left, right| left.name().cmp(right.name()));
    for target in &targets {
        renderer.imports_mut().reserve(target.name());
    }

    let scopes: Vec<FileScope> = package
        .files()
        .iter()
        .map(|file| FileScope::new(package, file))
        .collect();
    for target in targets {
        let model = BuilderModel::assemble(package, target);
        render_builder(&mut renderer, &model, &scopes)?;
    }
    Ok(renderer.finish())
}

/// Writes `contents` to `dest` in one go, creating parent directories.
fn write_output(dest: &Utf8Path, contents: &str) -> Result<Utf8PathBuf> {
    let parent = match dest.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let filename = dest
        .file_name()
        .ok_or_else(|| OpgenError::InvalidDestination(dest.to_string()))?;
    let dir = ensure_dir(parent)?;
    let mut file = dir
        .open_with(
            filename,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| OpgenError::io(dest, io_err))?;
    file.write_all(contents.as_bytes())
        .map_err(|io_err| OpgenError::io(dest, io_err))?;
    Ok(dest.to_path_buf())
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|io_err| OpgenError::io(path, io_err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|io_err| OpgenError::io(path, io_err))
        }
        Err(open_err) => Err(OpgenError::io(path, open_err)),
    }
}
