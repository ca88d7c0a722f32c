//! Extraction and normalization of option documentation.
//!
//! Doc comments reach us as `#[doc = "..."]` attributes on the declaring
//! item, with the `///` marker already removed by the parser. What is left
//! is the author's indentation and, usually, a restatement of the option's
//! own name on the first line; the renderer prepends the setter name
//! instead, so that restatement is dropped.

use syn::{Attribute, Expr, Item, Lit, Meta};

use crate::mapping::OptionItem;
use crate::package::SourcePackage;

/// Reads option documentation from the source model.
#[derive(Debug, Clone, Copy)]
pub struct CommentExtractor<'p> {
    package: &'p SourcePackage,
}

impl<'p> CommentExtractor<'p> {
    /// Creates an extractor over `package`.
    #[must_use]
    pub const fn new(package: &'p SourcePackage) -> Self {
        Self { package }
    }

    /// Returns the normalized doc lines of `item`, or nothing when the
    /// declaration is undocumented.
    #[must_use]
    pub fn extract(&self, item: &OptionItem) -> Vec<String> {
        let attrs = match self.package.item(item.decl()) {
            Some(Item::Const(decl)) => &decl.attrs,
            Some(Item::Static(decl)) => &decl.attrs,
            Some(Item::Fn(decl)) => &decl.attrs,
            _ => return Vec::new(),
        };
        normalize_doc_lines(item.name(), &doc_lines(attrs))
    }
}

/// Collects the raw text lines of every literal doc attribute.
///
/// A bare `///` arrives as an empty attribute and still yields one empty
/// line.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(pair) => match &pair.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(text) => Some(text.value()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .flat_map(|text| {
            text.split('\n')
                .map(|line| line.trim_end().to_owned())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Strips comment indentation and the leading name restatement.
///
/// The first line loses its leading spaces, then a leading copy of `name`
/// and the spaces after it. Later lines lose at most as many leading
/// spaces as the first line had, so relative indentation survives.
#[must_use]
pub fn normalize_doc_lines(name: &str, raw: &[String]) -> Vec<String> {
    let Some((first, rest)) = raw.split_first() else {
        return Vec::new();
    };

    let unindented = first.trim_start_matches(' ');
    let offset = first.len() - unindented.len();
    let lead = unindented
        .strip_prefix(name)
        .unwrap_or(unindented)
        .trim_start_matches(' ');

    let mut lines = Vec::with_capacity(raw.len());
    lines.push(lead.to_owned());
    lines.extend(rest.iter().map(|line| strip_indent(line, offset).to_owned()));
    lines
}

fn strip_indent(line: &str, offset: usize) -> &str {
    let mut rest = line;
    for _ in 0..offset {
        match rest.strip_prefix(' ') {
            Some(shorter) => rest = shorter,
            None => break,
        }
    }
    rest
}
