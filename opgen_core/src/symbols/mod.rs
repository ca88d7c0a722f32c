//! Symbol collection and the module-wide symbol table.
//!
//! [`collect_names`] lists the module-level consts, statics and functions
//! in declaration order. [`SymbolTable`] maps value-namespace names to
//! their classified declarations. Classification happens once, here, so
//! later stages only match on closed enums.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use syn::visit::Visit;
use syn::{Expr, FnArg, Item, ItemConst, ItemFn, ItemStatic, Lit, ReturnType, Signature, Type, UnOp};

use crate::issues::UntypedKind;
use crate::package::{DeclId, SourcePackage, SourcePosition};

/// Declared type of a constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstType {
    /// An explicit type annotation.
    Typed(Type),
    /// The inferred `_` type, with the initializer's literal kind.
    Untyped(UntypedKind),
}

/// Value type of a function used as an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FnType {
    /// The equivalent `fn` pointer type.
    Pointer(Type),
    /// The signature has no `fn` pointer equivalent.
    Unsupported(&'static str),
}

/// Classified declaration kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// A `const` item.
    Const(ConstType),
    /// A `static` item.
    Static(Type),
    /// A free function.
    Function(FnType),
    /// Any other value-namespace declaration, such as a unit struct.
    Other,
}

/// One declaration in the source module.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Declared name.
    pub name: String,
    /// Classified kind.
    pub kind: SymbolKind,
    /// Declaration site.
    pub position: SourcePosition,
    /// Structural handle to the declaring item.
    pub decl: DeclId,
    /// Whether the item carries any `pub` visibility.
    pub is_visible: bool,
}

/// Read-only lookup from name to declaration.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    /// Builds the table from every top-level item of `package`.
    ///
    /// When a name is declared more than once the first declaration wins.
    #[must_use]
    pub fn build(package: &SourcePackage) -> Self {
        let mut symbols = HashMap::new();
        for (file_index, file) in package.files().iter().enumerate() {
            for (item_index, item) in file.syntax().items.iter().enumerate() {
                let Some((ident, kind, is_visible)) = classify_item(item) else {
                    continue;
                };
                let name = ident.to_string();
                if let Entry::Vacant(slot) = symbols.entry(name.clone()) {
                    slot.insert(Symbol {
                        name,
                        kind,
                        position: SourcePosition::from_span(file.path(), ident.span()),
                        decl: DeclId {
                            file: file_index,
                            item: item_index,
                        },
                        is_visible,
                    });
                }
            }
        }
        Self { symbols }
    }

    /// Looks up a declaration by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Number of declarations in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Lists module-level const, static and function names in file order and,
/// within a file, declaration order.
#[must_use]
pub fn collect_names(package: &SourcePackage) -> Vec<String> {
    let mut collector = NameCollector::default();
    for file in package.files() {
        collector.visit_file(file.syntax());
    }
    collector.names
}

#[derive(Default)]
struct NameCollector {
    names: Vec<String>,
}

impl NameCollector {
    fn push(&mut self, ident: &syn::Ident) {
        if ident != "_" {
            self.names.push(ident.to_string());
        }
    }
}

impl<'ast> Visit<'ast> for NameCollector {
    fn visit_item_const(&mut self, item: &'ast ItemConst) {
        self.push(&item.ident);
    }

    fn visit_item_static(&mut self, item: &'ast ItemStatic) {
        self.push(&item.ident);
    }

    fn visit_item_fn(&mut self, item: &'ast ItemFn) {
        self.push(&item.sig.ident);
    }

    // Nested scopes never contribute module-level names.
    fn visit_item_mod(&mut self, _: &'ast syn::ItemMod) {}
    fn visit_item_impl(&mut self, _: &'ast syn::ItemImpl) {}
    fn visit_item_trait(&mut self, _: &'ast syn::ItemTrait) {}
    fn visit_item_foreign_mod(&mut self, _: &'ast syn::ItemForeignMod) {}
    fn visit_block(&mut self, _: &'ast syn::Block) {}
}

fn classify_item(item: &Item) -> Option<(&syn::Ident, SymbolKind, bool)> {
    match item {
        Item::Const(item) => Some((
            &item.ident,
            SymbolKind::Const(classify_const(&item.ty, &item.expr)),
            is_pub(&item.vis),
        )),
        Item::Static(item) => Some((
            &item.ident,
            SymbolKind::Static((*item.ty).clone()),
            is_pub(&item.vis),
        )),
        Item::Fn(item) => Some((
            &item.sig.ident,
            SymbolKind::Function(fn_pointer_type(&item.sig)),
            is_pub(&item.vis),
        )),
        Item::Struct(item) if !matches!(item.fields, syn::Fields::Named(_)) => {
            Some((&item.ident, SymbolKind::Other, is_pub(&item.vis)))
        }
        _ => None,
    }
}

/// Whether `vis` makes the item reachable from outside its own module.
///
/// `pub(self)` and `pub(in self)` are spelled like public items but are as
/// private as no visibility at all.
fn is_pub(vis: &syn::Visibility) -> bool {
    match vis {
        syn::Visibility::Public(_) => true,
        syn::Visibility::Restricted(restricted) => !restricted.path.is_ident("self"),
        syn::Visibility::Inherited => false,
    }
}

fn classify_const(ty: &Type, expr: &Expr) -> ConstType {
    match ty {
        Type::Infer(_) => ConstType::Untyped(literal_kind(expr)),
        other => ConstType::Typed(other.clone()),
    }
}

fn literal_kind(expr: &Expr) -> UntypedKind {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(_) => UntypedKind::Str,
            Lit::ByteStr(_) => UntypedKind::ByteStr,
            Lit::Byte(_) => UntypedKind::Byte,
            Lit::Char(_) => UntypedKind::Char,
            Lit::Int(_) => UntypedKind::Int,
            Lit::Float(_) => UntypedKind::Float,
            Lit::Bool(_) => UntypedKind::Bool,
            _ => UntypedKind::Other,
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => literal_kind(&unary.expr),
        Expr::Paren(inner) => literal_kind(&inner.expr),
        Expr::Group(inner) => literal_kind(&inner.expr),
        _ => UntypedKind::Other,
    }
}

/// Builds the `fn` pointer type matching a free function signature.
fn fn_pointer_type(sig: &Signature) -> FnType {
    if sig.asyncness.is_some() {
        return FnType::Unsupported("async functions have no fn pointer type");
    }
    if sig.variadic.is_some() {
        return FnType::Unsupported("variadic functions are not supported");
    }
    if sig.generics.where_clause.is_some() {
        return FnType::Unsupported("where clauses make the function generic");
    }

    let mut lifetimes = Vec::new();
    for param in &sig.generics.params {
        match param {
            syn::GenericParam::Lifetime(param) => lifetimes.push(&param.lifetime),
            _ => return FnType::Unsupported("generic functions have no single fn pointer type"),
        }
    }

    let mut inputs = Vec::with_capacity(sig.inputs.len());
    for arg in &sig.inputs {
        match arg {
            FnArg::Receiver(_) => return FnType::Unsupported("methods are not supported"),
            FnArg::Typed(typed) if matches!(*typed.ty, Type::ImplTrait(_)) => {
                return FnType::Unsupported("impl Trait arguments make the function generic");
            }
            FnArg::Typed(typed) => inputs.push(&*typed.ty),
        }
    }
    if let ReturnType::Type(_, ty) = &sig.output {
        if matches!(**ty, Type::ImplTrait(_)) {
            return FnType::Unsupported("impl Trait return types have no fn pointer type");
        }
    }

    let unsafety = &sig.unsafety;
    let abi = &sig.abi;
    let output = &sig.output;
    let pointer: Type = if lifetimes.is_empty() {
        syn::parse_quote!(#unsafety #abi fn(#(#inputs),*) #output)
    } else {
        syn::parse_quote!(for<#(#lifetimes),*> #unsafety #abi fn(#(#inputs),*) #output)
    };
    FnType::Pointer(pointer)
}

#[cfg(test)]
mod tests;
