//! Unit tests for symbol collection and classification.

use super::*;
use crate::package::SourceFile;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::parse_quote;

fn package(source: &str) -> SourcePackage {
    let file = SourceFile::parse("src/options.rs", source).expect("parse source");
    SourcePackage::new("crate::options".parse().expect("module path"), vec![file])
}

#[test]
fn collects_module_level_values_in_order() {
    let pkg = package(
        r#"
        pub const ExampleName: &str = "example";
        pub fn ExampleLogger(err: std::io::Error) {
            const Hidden: u8 = 1;
            let _ = (err, Hidden);
        }
        pub static ExampleSize: i64 = 0;
        const _: () = ();
        pub struct ExampleUnit;
        impl ExampleUnit {
            pub const ExampleAssoc: u8 = 2;
        }
        mod nested {
            pub const ExampleNested: u8 = 3;
        }
        "#,
    );

    assert_eq!(
        collect_names(&pkg),
        ["ExampleName", "ExampleLogger", "ExampleSize"]
    );
}

#[test]
fn table_classifies_declarations() -> Result<()> {
    let pkg = package(
        "pub const A: u32 = 1;\n\
         const B: _ = -2;\n\
         pub static mut C: bool = false;\n\
         pub fn D(x: u8) -> bool { x > 0 }\n\
         pub struct E;\n\
         pub struct F { x: u8 }\n",
    );
    let table = SymbolTable::build(&pkg);
    ensure!(table.len() == 5, "named struct F must not be a value symbol");

    let a = table.lookup("A").ok_or_else(|| anyhow!("A missing"))?;
    ensure!(a.kind == SymbolKind::Const(ConstType::Typed(parse_quote!(u32))));
    ensure!(a.is_visible);
    ensure!(a.position.line == 1 && a.position.column == 11);

    let b = table.lookup("B").ok_or_else(|| anyhow!("B missing"))?;
    ensure!(b.kind == SymbolKind::Const(ConstType::Untyped(UntypedKind::Int)));
    ensure!(!b.is_visible);
    ensure!(b.decl.item == 1);

    let c = table.lookup("C").ok_or_else(|| anyhow!("C missing"))?;
    ensure!(c.kind == SymbolKind::Static(parse_quote!(bool)));

    let d = table.lookup("D").ok_or_else(|| anyhow!("D missing"))?;
    ensure!(d.kind == SymbolKind::Function(FnType::Pointer(parse_quote!(fn(u8) -> bool))));

    let e = table.lookup("E").ok_or_else(|| anyhow!("E missing"))?;
    ensure!(e.kind == SymbolKind::Other);
    Ok(())
}

#[test]
fn first_declaration_wins() -> Result<()> {
    let pkg = package("pub struct Shadow;\npub const Shadow: u8 = 1;\n");
    let table = SymbolTable::build(&pkg);
    let symbol = table.lookup("Shadow").ok_or_else(|| anyhow!("Shadow missing"))?;
    ensure!(symbol.kind == SymbolKind::Other);
    Ok(())
}

#[rstest]
#[case::string("\"text\"", UntypedKind::Str)]
#[case::float("1.5", UntypedKind::Float)]
#[case::negative("-(3)", UntypedKind::Int)]
#[case::boolean("true", UntypedKind::Bool)]
#[case::character("'c'", UntypedKind::Char)]
#[case::byte_string("b\"raw\"", UntypedKind::ByteStr)]
#[case::call("make()", UntypedKind::Other)]
fn classifies_untyped_literals(#[case] source: &str, #[case] expected: UntypedKind) {
    let expr: Expr = syn::parse_str(source).expect("parse expression");
    assert_eq!(literal_kind(&expr), expected);
}

#[rstest]
#[case::plain(parse_quote!(fn hook(a: u8, b: &str) -> String), parse_quote!(fn(u8, &str) -> String))]
#[case::unit(parse_quote!(fn hook()), parse_quote!(fn()))]
#[case::unsafe_extern(parse_quote!(unsafe extern "C" fn hook(a: i32)), parse_quote!(unsafe extern "C" fn(i32)))]
#[case::lifetimes(parse_quote!(fn hook<'a>(a: &'a str) -> &'a str), parse_quote!(for<'a> fn(&'a str) -> &'a str))]
fn builds_fn_pointer_types(#[case] sig: Signature, #[case] expected: Type) {
    assert_eq!(fn_pointer_type(&sig), FnType::Pointer(expected));
}

#[rstest]
#[case::generic(parse_quote!(fn hook<T>(a: T)))]
#[case::async_fn(parse_quote!(async fn hook()))]
#[case::impl_arg(parse_quote!(fn hook(a: impl Fn())))]
#[case::impl_ret(parse_quote!(fn hook() -> impl Fn()))]
#[case::where_clause(parse_quote!(fn hook() where u8: Copy))]
fn rejects_signatures_without_pointer_type(#[case] sig: Signature) {
    assert!(matches!(fn_pointer_type(&sig), FnType::Unsupported(_)));
}

#[rstest]
#[case::public(parse_quote!(pub), true)]
#[case::crate_wide(parse_quote!(pub(crate)), true)]
#[case::parent(parse_quote!(pub(super)), true)]
#[case::in_path(parse_quote!(pub(in crate::internal)), true)]
#[case::self_only(parse_quote!(pub(self)), false)]
#[case::in_self(parse_quote!(pub(in self)), false)]
#[case::inherited(syn::Visibility::Inherited, false)]
fn classifies_visibility(#[case] vis: syn::Visibility, #[case] expected: bool) {
    assert_eq!(is_pub(&vis), expected);
}
