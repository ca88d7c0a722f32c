//! Import table of a generated file.

use std::collections::{BTreeMap, HashSet};

/// Paths imported by a generated file and the aliases they are bound to.
///
/// Each path is imported once. Aliases never collide with each other or
/// with reserved names; a taken alias gets a numeric suffix.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    by_path: BTreeMap<String, String>,
    taken: HashSet<String>,
}

impl ImportTable {
    /// Marks `name` as declared by the generated file itself.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_owned());
    }

    /// Imports `path`, preferably as `preferred`, and returns its alias.
    pub fn import(&mut self, path: &str, preferred: &str) -> String {
        if let Some(alias) = self.by_path.get(path) {
            return alias.clone();
        }
        let alias = self.free_alias(preferred);
        self.taken.insert(alias.clone());
        self.by_path.insert(path.to_owned(), alias.clone());
        alias
    }

    /// Alias bound to `path`, if imported.
    #[must_use]
    pub fn alias(&self, path: &str) -> Option<&str> {
        self.by_path.get(path).map(String::as_str)
    }

    /// Whether nothing has been imported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Renders one `use` line per import, sorted by path.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (path, alias) in &self.by_path {
            if path.rsplit("::").next() == Some(alias.as_str()) {
                out.push_str(&format!("use {path};\n"));
            } else {
                out.push_str(&format!("use {path} as {alias};\n"));
            }
        }
        out
    }

    fn free_alias(&self, preferred: &str) -> String {
        if !self.taken.contains(preferred) {
            return preferred.to_owned();
        }
        let mut suffix = 2_usize;
        loop {
            let candidate = format!("{preferred}_{suffix}");
            if !self.taken.contains(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
