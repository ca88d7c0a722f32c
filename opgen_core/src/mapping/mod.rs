//! Mapping of module-level declarations to the target types that own them.
//!
//! The mapper walks collected names in declaration order, looks each one up
//! in the [`SymbolTable`], resolves its owner with [`owner`], and admits it
//! into that owner's option list. Problems are recorded and reported, never
//! raised early: the pass fails once at the end with every issue listed.

use std::collections::{HashMap, HashSet};

use heck::ToSnakeCase;
use syn::Type;

use crate::error::{OpgenError, Result};
use crate::issues::{AggregatedIssues, Reporter, ValidationIssue};
use crate::names::TypeName;
use crate::owner::owner;
use crate::package::{DeclId, SourcePackage, SourcePosition};
use crate::symbols::{ConstType, FnType, Symbol, SymbolKind, SymbolTable, collect_names};

/// Setter names that cannot be written even as raw identifiers.
pub(crate) const UNRAWABLE_SETTERS: [&str; 4] = ["self", "Self", "super", "crate"];

/// Kind of declaration an option was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// A `const` item; applied as a default.
    Const,
    /// A `static` item; only settable explicitly.
    Static,
    /// A free function; applied as a default.
    Function,
}

impl OptionKind {
    /// Whether options of this kind are applied by the generated constructor.
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Const | Self::Function)
    }
}

/// One admitted option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    name: String,
    kind: OptionKind,
    value_type: Type,
    position: SourcePosition,
    decl: DeclId,
    owner: String,
    setter: String,
}

impl OptionItem {
    /// Full declared name, e.g. `ExampleName`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration kind.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Type used for the setter parameter.
    #[must_use]
    pub const fn value_type(&self) -> &Type {
        &self.value_type
    }

    /// Declaration site.
    #[must_use]
    pub const fn position(&self) -> &SourcePosition {
        &self.position
    }

    /// Structural handle to the declaring item.
    #[must_use]
    pub const fn decl(&self) -> DeclId {
        self.decl
    }

    /// Target type this option belongs to.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The name with the owner prefix removed, e.g. `Name`.
    #[must_use]
    pub fn suffix(&self) -> &str {
        self.name.strip_prefix(&self.owner).unwrap_or(&self.name)
    }

    /// Setter method name in `snake_case`, e.g. `name`.
    #[must_use]
    pub fn setter(&self) -> &str {
        &self.setter
    }
}

/// A requested type with the options it owns, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetType {
    name: String,
    options: Vec<OptionItem>,
}

impl TargetType {
    /// Type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owned options in declaration order.
    #[must_use]
    pub fn options(&self) -> &[OptionItem] {
        &self.options
    }
}

/// Result of a successful mapping pass, in requested type order.
#[derive(Debug, Clone, Default)]
pub struct OptionMapping {
    targets: Vec<TargetType>,
}

impl OptionMapping {
    /// Looks up a target type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TargetType> {
        self.targets.iter().find(|target| target.name == name)
    }

    /// Target types in requested order, without duplicates.
    #[must_use]
    pub fn targets(&self) -> &[TargetType] {
        &self.targets
    }
}

struct IssueLog<'r> {
    reporter: &'r mut dyn Reporter,
    issues: AggregatedIssues,
}

impl IssueLog<'_> {
    fn record(&mut self, issue: ValidationIssue) {
        self.reporter.report(&issue);
        self.issues.push(issue);
    }
}

/// Maps every option declared in `package` to its owning type.
///
/// Names are taken from [`collect_names`] and resolved through `table`.
/// Each validation issue is sent to `reporter` as soon as it is found.
///
/// # Errors
///
/// Returns [`OpgenError::Validation`] when at least one issue was reported,
/// after the whole module has been scanned.
pub fn map_options(
    package: &SourcePackage,
    table: &SymbolTable,
    targets: &[TypeName],
    reporter: &mut dyn Reporter,
) -> Result<OptionMapping> {
    let mut type_names: Vec<&str> = Vec::with_capacity(targets.len());
    for target in targets {
        if type_names.contains(&target.as_str()) {
            tracing::warn!(type_name = %target, "type requested more than once");
        } else {
            type_names.push(target.as_str());
        }
    }

    let mut log = IssueLog {
        reporter,
        issues: AggregatedIssues::default(),
    };
    let mut options: HashMap<&str, Vec<OptionItem>> = HashMap::new();
    let mut matched: HashSet<&str> = HashSet::new();
    let mut setters: HashMap<(&str, String), String> = HashMap::new();
    let mut seen: HashSet<String> = HashSet::new();

    for name in collect_names(package) {
        if !seen.insert(name.clone()) {
            continue;
        }
        let Some(symbol) = table.lookup(&name) else {
            continue;
        };
        let Some(type_name) = owner(&symbol.name, &type_names) else {
            continue;
        };
        // A type counts as matched once it has an admitted option or a
        // reported rejection; silently skipped names do not count.
        let reported = log.issues.len();
        let admitted = admit(symbol, type_name, &mut log);
        if admitted.is_some() || log.issues.len() > reported {
            matched.insert(type_name);
        }
        let Some(item) = admitted else {
            continue;
        };
        let key = (type_name, item.setter.clone());
        if let Some(previous) = setters.get(&key) {
            log.record(ValidationIssue::SetterCollision {
                type_name: type_name.to_owned(),
                setter: item.setter,
                previous: previous.clone(),
                name: item.name,
                position: item.position,
            });
            continue;
        }
        setters.insert(key, item.name.clone());

        tracing::debug!(option = %item.name, owner = type_name, kind = ?item.kind, "admitted option");
        options.entry(type_name).or_default().push(item);
    }

    for type_name in &type_names {
        if !matched.contains(type_name) {
            log.record(ValidationIssue::NoOptions((*type_name).to_owned()));
        }
    }

    if !log.issues.is_empty() {
        return Err(OpgenError::Validation(log.issues));
    }

    let targets = type_names
        .iter()
        .map(|type_name| TargetType {
            name: (*type_name).to_owned(),
            options: options.remove(type_name).unwrap_or_default(),
        })
        .collect();
    Ok(OptionMapping { targets })
}

/// Validates a symbol owned by `type_name` and turns it into an option.
fn admit(symbol: &Symbol, type_name: &str, log: &mut IssueLog<'_>) -> Option<OptionItem> {
    let (kind, value_type) = match &symbol.kind {
        SymbolKind::Const(ConstType::Typed(ty)) => (OptionKind::Const, ty.clone()),
        SymbolKind::Const(ConstType::Untyped(literal)) => {
            log.record(ValidationIssue::UntypedConstant {
                name: symbol.name.clone(),
                position: symbol.position.clone(),
                kind: *literal,
            });
            return None;
        }
        SymbolKind::Static(ty) => (OptionKind::Static, ty.clone()),
        SymbolKind::Function(FnType::Pointer(ty)) => (OptionKind::Function, ty.clone()),
        SymbolKind::Function(FnType::Unsupported(reason)) => {
            log.record(ValidationIssue::UnsupportedFunction {
                name: symbol.name.clone(),
                position: symbol.position.clone(),
                reason: *reason,
            });
            return None;
        }
        SymbolKind::Other => return None,
    };

    if kind.is_default() && !symbol.is_visible {
        log.record(ValidationIssue::PrivateDefault {
            name: symbol.name.clone(),
            position: symbol.position.clone(),
        });
    }

    let suffix = symbol.name.strip_prefix(type_name).unwrap_or(&symbol.name);
    let setter = suffix.to_snake_case();
    if setter.is_empty() {
        log.record(ValidationIssue::EmptySetter {
            name: symbol.name.clone(),
            position: symbol.position.clone(),
        });
        return None;
    }
    if UNRAWABLE_SETTERS.contains(&setter.as_str()) {
        log.record(ValidationIssue::ReservedSetter {
            name: symbol.name.clone(),
            setter,
            position: symbol.position.clone(),
        });
        return None;
    }

    Some(OptionItem {
        name: symbol.name.clone(),
        kind,
        value_type,
        position: symbol.position.clone(),
        decl: symbol.decl,
        owner: type_name.to_owned(),
        setter,
    })
}
