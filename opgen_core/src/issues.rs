//! Validation issues raised while mapping options, and the reporters that
//! surface them.
//!
//! Issues never abort the mapping pass. Each one is handed to a
//! [`Reporter`] as soon as it is found and kept so the pass can fail once,
//! with every problem already visible to the user.

use std::fmt;

use thiserror::Error;

use crate::package::SourcePosition;

/// Literal kind of an untyped constant initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntypedKind {
    /// `true` or `false`.
    Bool,
    /// A character literal.
    Char,
    /// An integer literal.
    Int,
    /// A floating point literal.
    Float,
    /// A string literal.
    Str,
    /// A byte string literal.
    ByteStr,
    /// A byte literal.
    Byte,
    /// Anything that is not a plain literal.
    Other,
}

impl UntypedKind {
    /// Returns a short human-readable name for the literal kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Str => "string",
            Self::ByteStr => "byte string",
            Self::Byte => "byte",
            Self::Other => "expression",
        }
    }
}

impl fmt::Display for UntypedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem found while mapping options to target types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// A constant option declared with the inferred `_` type.
    #[error(
        "{position} untyped {kind} constant {name} is not supported, please specify constant type explicitly"
    )]
    UntypedConstant {
        /// Constant name.
        name: String,
        /// Declaration site.
        position: SourcePosition,
        /// Literal kind of the initializer.
        kind: UntypedKind,
    },

    /// A function option that cannot be expressed as a `fn` pointer.
    #[error("{position} function {name} cannot be used as an option: {reason}")]
    UnsupportedFunction {
        /// Function name.
        name: String,
        /// Declaration site.
        position: SourcePosition,
        /// Why the signature was rejected.
        reason: &'static str,
    },

    /// A default option that the generated constructor cannot reference.
    #[error("{position} {name} is applied as a default and must be declared `pub` or `pub(crate)`")]
    PrivateDefault {
        /// Option name.
        name: String,
        /// Declaration site.
        position: SourcePosition,
    },

    /// Two options of one type map to the same setter.
    #[error("{position} {name} and {previous} both produce setter {setter} for {type_name}")]
    SetterCollision {
        /// Target type name.
        type_name: String,
        /// Colliding setter name.
        setter: String,
        /// Option admitted first.
        previous: String,
        /// Option rejected.
        name: String,
        /// Declaration site of the rejected option.
        position: SourcePosition,
    },

    /// An option name whose suffix yields no setter identifier.
    #[error("{position} {name} does not leave a usable setter name after its type prefix")]
    EmptySetter {
        /// Option name.
        name: String,
        /// Declaration site.
        position: SourcePosition,
    },

    /// An option name whose setter would be a path keyword.
    #[error("{position} {name} produces setter `{setter}`, which cannot be used as a method name")]
    ReservedSetter {
        /// Option name.
        name: String,
        /// Rejected setter name.
        setter: String,
        /// Declaration site.
        position: SourcePosition,
    },

    /// A requested target type received no options at all.
    #[error("no options found for {0}")]
    NoOptions(String),
}

/// Side channel receiving validation issues as they are discovered.
pub trait Reporter {
    /// Records one issue.
    fn report(&mut self, issue: &ValidationIssue);
}

/// Reporter that emits each issue as a `tracing` error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, issue: &ValidationIssue) {
        tracing::error!("{issue}");
    }
}

/// Reporter that keeps issues in memory, in report order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    issues: Vec<ValidationIssue>,
}

impl CollectingReporter {
    /// Returns the issues reported so far.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, issue: &ValidationIssue) {
        self.issues.push(issue.clone());
    }
}

/// Collection of [`ValidationIssue`]s produced during a single mapping pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregatedIssues(Vec<ValidationIssue>);

impl AggregatedIssues {
    /// Create a new aggregation from a vector of issues.
    #[must_use]
    pub const fn new(issues: Vec<ValidationIssue>) -> Self {
        Self(issues)
    }

    /// Iterate over the contained issues.
    #[must_use = "iterators should be consumed to inspect issues"]
    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.0.iter()
    }

    /// Number of issues in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no issue has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, issue: ValidationIssue) {
        self.0.push(issue);
    }
}

impl fmt::Display for AggregatedIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.len() {
            1 => write!(f, "1 validation issue"),
            n => write!(f, "{n} validation issues"),
        }
    }
}

impl<'a> IntoIterator for &'a AggregatedIssues {
    type Item = &'a ValidationIssue;
    type IntoIter = std::slice::Iter<'a, ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AggregatedIssues {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
