//! Name scope of a source file, used to re-qualify types for generated code.

use std::collections::{HashMap, HashSet};

use syn::{Item, UseTree};

use super::{SourceFile, SourcePackage};
use crate::names::ModulePath;

/// How an identifier in a source file's type position resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopedName<'a> {
    /// Declared by the source module itself.
    Local,
    /// Brought in by a `use` declaration; holds the full path.
    Imported(&'a str),
}

/// Identifiers visible in one source file beyond the prelude.
#[derive(Debug, Clone)]
pub struct FileScope {
    module_path: ModulePath,
    uses: HashMap<String, String>,
    locals: HashSet<String>,
}

impl FileScope {
    /// Builds the scope of `file`, a member of `package`.
    #[must_use]
    pub fn new(package: &SourcePackage, file: &SourceFile) -> Self {
        let module_path = package.module_path().clone();
        let locals = package
            .files()
            .iter()
            .flat_map(|member| member.syntax().items.iter())
            .filter_map(local_type_name)
            .collect();

        let mut uses = HashMap::new();
        for item in &file.syntax().items {
            if let Item::Use(item_use) = item {
                flatten_use(&module_path, Vec::new(), &item_use.tree, &mut uses);
            }
        }

        Self {
            module_path,
            uses,
            locals,
        }
    }

    /// Module path of the source module.
    #[must_use]
    pub const fn module_path(&self) -> &ModulePath {
        &self.module_path
    }

    /// Resolves a leading path identifier.
    #[must_use]
    pub fn resolve(&self, ident: &str) -> Option<ScopedName<'_>> {
        if let Some(path) = self.uses.get(ident) {
            return Some(ScopedName::Imported(path));
        }
        self.locals.contains(ident).then_some(ScopedName::Local)
    }
}

fn local_type_name(item: &Item) -> Option<String> {
    let ident = match item {
        Item::Struct(item) => &item.ident,
        Item::Enum(item) => &item.ident,
        Item::Union(item) => &item.ident,
        Item::Type(item) => &item.ident,
        Item::Trait(item) => &item.ident,
        Item::TraitAlias(item) => &item.ident,
        _ => return None,
    };
    Some(ident.to_string())
}

fn flatten_use(
    module_path: &ModulePath,
    prefix: Vec<String>,
    tree: &UseTree,
    out: &mut HashMap<String, String>,
) {
    match tree {
        UseTree::Path(path) => {
            let mut next = prefix;
            next.push(path.ident.to_string());
            flatten_use(module_path, next, &path.tree, out);
        }
        UseTree::Name(name) => {
            let ident = name.ident.to_string();
            if ident == "self" {
                if let Some(last) = prefix.last().cloned() {
                    out.insert(last, absolute_path(module_path, &prefix));
                }
            } else {
                let mut full = prefix;
                full.push(ident.clone());
                out.insert(ident, absolute_path(module_path, &full));
            }
        }
        UseTree::Rename(rename) => {
            let alias = rename.rename.to_string();
            if alias == "_" {
                return;
            }
            let mut full = prefix;
            let ident = rename.ident.to_string();
            if ident != "self" {
                full.push(ident);
            }
            out.insert(alias, absolute_path(module_path, &full));
        }
        UseTree::Group(group) => {
            for nested in &group.items {
                flatten_use(module_path, prefix.clone(), nested, out);
            }
        }
        UseTree::Glob(_) => {}
    }
}

/// Rewrites `self::` and `super::` prefixes against the module path.
fn absolute_path(module_path: &ModulePath, segments: &[String]) -> String {
    let mut base: Option<ModulePath> = None;
    let mut rest = segments;
    while let Some((head, tail)) = rest.split_first() {
        match head.as_str() {
            "self" => {
                base = Some(base.unwrap_or_else(|| module_path.clone()));
            }
            "super" => {
                let current = base.unwrap_or_else(|| module_path.clone());
                base = Some(current.parent().unwrap_or(current));
            }
            _ => break,
        }
        rest = tail;
    }

    let mut parts: Vec<&str> = base
        .as_ref()
        .map(|path| path.segments().iter().map(String::as_str).collect())
        .unwrap_or_default();
    parts.extend(rest.iter().map(String::as_str));
    parts.join("::")
}

#[cfg(test)]
mod tests {
    //! Unit tests for source file scopes.

    use super::*;

    fn scope_of(source: &str) -> FileScope {
        let file = SourceFile::parse("src/internal/options.rs", source).expect("parse source");
        let module = "crate::internal::options".parse().expect("module path");
        let package = SourcePackage::new(module, vec![file]);
        let first = package.file(0).expect("first file");
        FileScope::new(&package, first)
    }

    #[test]
    fn resolves_use_declarations() {
        let scope = scope_of(
            "use std::time::Duration;\n\
             use std::io::{self, Error as IoError};\n\
             use super::shared::Clock;\n\
             use self::inner::Mode;\n\
             use std::fmt::*;\n",
        );
        assert_eq!(
            scope.resolve("Duration"),
            Some(ScopedName::Imported("std::time::Duration"))
        );
        assert_eq!(scope.resolve("io"), Some(ScopedName::Imported("std::io")));
        assert_eq!(
            scope.resolve("IoError"),
            Some(ScopedName::Imported("std::io::Error"))
        );
        assert_eq!(
            scope.resolve("Clock"),
            Some(ScopedName::Imported("crate::internal::shared::Clock"))
        );
        assert_eq!(
            scope.resolve("Mode"),
            Some(ScopedName::Imported("crate::internal::options::inner::Mode"))
        );
        assert_eq!(scope.resolve("Display"), None);
    }

    #[test]
    fn marks_local_types() {
        let scope = scope_of("pub struct Level(u8);\npub type Hook = fn();\nconst X: u8 = 1;\n");
        assert_eq!(scope.resolve("Level"), Some(ScopedName::Local));
        assert_eq!(scope.resolve("Hook"), Some(ScopedName::Local));
        assert_eq!(scope.resolve("X"), None);
        assert_eq!(scope.resolve("u8"), None);
    }
}
