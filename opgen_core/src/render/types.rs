//! Rendering of source module types into generated code.
//!
//! Types are copied from the source module, so every name must be made
//! reachable from the generated file: local types go through the module
//! import, `use`d names are re-imported, and `self::`/`super::` prefixes are
//! resolved against the module path.

use quote::ToTokens;
use syn::{
    BareFnArg, BoundLifetimes, GenericArgument, GenericParam, Path, PathArguments, ReturnType,
    Type, TypeParamBound, punctuated::Punctuated, token::Plus,
};

use super::imports::ImportTable;
use super::module_alias;
use crate::package::{FileScope, ScopedName};

/// What to do with references that carry no lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elision {
    /// Leave them elided.
    Preserve,
    /// Make them `'static`, as required for `const` and `static` values
    /// outside of function signatures.
    Static,
}

/// Formats types declared in one source file.
#[derive(Debug, Clone, Copy)]
pub struct TypeFormatter<'s> {
    scope: &'s FileScope,
}

impl<'s> TypeFormatter<'s> {
    /// Creates a formatter for the file described by `scope`.
    #[must_use]
    pub const fn new(scope: &'s FileScope) -> Self {
        Self { scope }
    }

    /// Renders `ty` as source text valid inside the generated file,
    /// registering whatever imports it needs.
    #[must_use]
    pub fn format(&self, ty: &Type, elision: Elision, imports: &mut ImportTable) -> String {
        let mut printer = Printer {
            scope: self.scope,
            imports,
            elision,
            signature_depth: 0,
            out: String::new(),
        };
        printer.ty(ty);
        printer.out
    }
}

struct Printer<'p> {
    scope: &'p FileScope,
    imports: &'p mut ImportTable,
    elision: Elision,
    signature_depth: usize,
    out: String,
}

impl Printer<'_> {
    fn ty(&mut self, ty: &Type) {
        match ty {
            Type::Array(array) => {
                self.out.push('[');
                self.ty(&array.elem);
                self.out.push_str("; ");
                self.tokens(&array.len);
                self.out.push(']');
            }
            Type::BareFn(bare) => {
                self.signature_depth += 1;
                if let Some(bound) = &bare.lifetimes {
                    self.bound_lifetimes(bound);
                }
                if bare.unsafety.is_some() {
                    self.out.push_str("unsafe ");
                }
                if let Some(abi) = &bare.abi {
                    self.out.push_str("extern ");
                    if let Some(name) = &abi.name {
                        self.tokens(name);
                        self.out.push(' ');
                    }
                }
                self.out.push_str("fn(");
                self.fn_args(&bare.inputs);
                if bare.variadic.is_some() {
                    if !bare.inputs.is_empty() {
                        self.out.push_str(", ");
                    }
                    self.out.push_str("...");
                }
                self.out.push(')');
                self.output(&bare.output);
                self.signature_depth -= 1;
            }
            Type::Group(group) => self.ty(&group.elem),
            Type::ImplTrait(bounds) => {
                self.out.push_str("impl ");
                self.bounds(&bounds.bounds);
            }
            Type::Infer(_) => self.out.push('_'),
            Type::Never(_) => self.out.push('!'),
            Type::Paren(paren) => {
                self.out.push('(');
                self.ty(&paren.elem);
                self.out.push(')');
            }
            Type::Path(type_path) if type_path.qself.is_none() => self.path(&type_path.path),
            Type::Ptr(ptr) => {
                self.out
                    .push_str(if ptr.mutability.is_some() { "*mut " } else { "*const " });
                self.ty(&ptr.elem);
            }
            Type::Reference(reference) => {
                self.out.push('&');
                match &reference.lifetime {
                    Some(lifetime) => {
                        self.out.push_str(&lifetime.to_string());
                        self.out.push(' ');
                    }
                    None if self.elision == Elision::Static && self.signature_depth == 0 => {
                        self.out.push_str("'static ");
                    }
                    None => {}
                }
                if reference.mutability.is_some() {
                    self.out.push_str("mut ");
                }
                self.ty(&reference.elem);
            }
            Type::Slice(slice) => {
                self.out.push('[');
                self.ty(&slice.elem);
                self.out.push(']');
            }
            Type::TraitObject(object) => {
                self.out.push_str("dyn ");
                self.bounds(&object.bounds);
            }
            Type::Tuple(tuple) => {
                self.out.push('(');
                for (index, elem) in tuple.elems.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.ty(elem);
                }
                if tuple.elems.len() == 1 {
                    self.out.push(',');
                }
                self.out.push(')');
            }
            other => self.tokens(other),
        }
    }

    fn fn_args(&mut self, inputs: &Punctuated<BareFnArg, syn::token::Comma>) {
        for (index, arg) in inputs.iter().enumerate() {
            if index > 0 {
                self.out.push_str(", ");
            }
            if let Some((name, _)) = &arg.name {
                self.out.push_str(&name.to_string());
                self.out.push_str(": ");
            }
            self.ty(&arg.ty);
        }
    }

    fn output(&mut self, output: &ReturnType) {
        if let ReturnType::Type(_, ty) = output {
            self.out.push_str(" -> ");
            self.ty(ty);
        }
    }

    fn bounds(&mut self, bounds: &Punctuated<TypeParamBound, Plus>) {
        for (index, bound) in bounds.iter().enumerate() {
            if index > 0 {
                self.out.push_str(" + ");
            }
            match bound {
                TypeParamBound::Trait(trait_bound) => {
                    if trait_bound.paren_token.is_some() {
                        self.out.push('(');
                    }
                    if matches!(trait_bound.modifier, syn::TraitBoundModifier::Maybe(_)) {
                        self.out.push('?');
                    }
                    if let Some(lifetimes) = &trait_bound.lifetimes {
                        self.bound_lifetimes(lifetimes);
                    }
                    self.path(&trait_bound.path);
                    if trait_bound.paren_token.is_some() {
                        self.out.push(')');
                    }
                }
                TypeParamBound::Lifetime(lifetime) => self.out.push_str(&lifetime.to_string()),
                other => self.tokens(other),
            }
        }
    }

    fn bound_lifetimes(&mut self, bound: &BoundLifetimes) {
        self.out.push_str("for<");
        for (index, param) in bound.lifetimes.iter().enumerate() {
            if index > 0 {
                self.out.push_str(", ");
            }
            match param {
                GenericParam::Lifetime(lifetime) => {
                    self.out.push_str(&lifetime.lifetime.to_string());
                }
                other => self.tokens(other),
            }
        }
        self.out.push_str("> ");
    }

    fn path(&mut self, path: &Path) {
        if path.leading_colon.is_some() {
            self.out.push_str("::");
            self.segments(path, 0);
            return;
        }
        let Some(first) = path.segments.first() else {
            return;
        };
        let scope = self.scope;
        let head = first.ident.to_string();
        match head.as_str() {
            "self" => {
                let alias = module_alias(self.imports, scope.module_path());
                self.out.push_str(&alias);
                self.rest(path, 1);
            }
            "super" => {
                let depth = path
                    .segments
                    .iter()
                    .take_while(|segment| segment.ident == "super")
                    .count();
                let mut base = scope.module_path().clone();
                for _ in 0..depth {
                    base = base.parent().unwrap_or(base);
                }
                self.out.push_str(&base.to_string());
                self.rest(path, depth);
            }
            _ => match scope.resolve(&head) {
                Some(ScopedName::Local) => {
                    let alias = module_alias(self.imports, scope.module_path());
                    self.out.push_str(&alias);
                    self.out.push_str("::");
                    self.segments(path, 0);
                }
                Some(ScopedName::Imported(full)) => {
                    let alias = self.imports.import(full, &head);
                    self.out.push_str(&alias);
                    self.arguments(&first.arguments);
                    self.rest(path, 1);
                }
                None => self.segments(path, 0),
            },
        }
    }

    /// Prints the segments after the first `skip`, each preceded by `::`.
    fn rest(&mut self, path: &Path, skip: usize) {
        if path.segments.len() > skip {
            self.out.push_str("::");
            self.segments(path, skip);
        }
    }

    fn segments(&mut self, path: &Path, skip: usize) {
        for (index, segment) in path.segments.iter().skip(skip).enumerate() {
            if index > 0 {
                self.out.push_str("::");
            }
            self.out.push_str(&segment.ident.to_string());
            self.arguments(&segment.arguments);
        }
    }

    fn arguments(&mut self, arguments: &PathArguments) {
        match arguments {
            PathArguments::None => {}
            PathArguments::AngleBracketed(angle) => {
                if angle.colon2_token.is_some() {
                    self.out.push_str("::");
                }
                self.out.push('<');
                for (index, arg) in angle.args.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.generic_argument(arg);
                }
                self.out.push('>');
            }
            PathArguments::Parenthesized(paren) => {
                self.signature_depth += 1;
                self.out.push('(');
                for (index, input) in paren.inputs.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.ty(input);
                }
                self.out.push(')');
                self.output(&paren.output);
                self.signature_depth -= 1;
            }
        }
    }

    fn generic_argument(&mut self, arg: &GenericArgument) {
        match arg {
            GenericArgument::Lifetime(lifetime) => self.out.push_str(&lifetime.to_string()),
            GenericArgument::Type(ty) => self.ty(ty),
            GenericArgument::AssocType(assoc) => {
                self.out.push_str(&assoc.ident.to_string());
                self.out.push_str(" = ");
                self.ty(&assoc.ty);
            }
            other => self.tokens(other),
        }
    }

    fn tokens(&mut self, node: &impl ToTokens) {
        self.out.push_str(&node.to_token_stream().to_string());
    }
}
