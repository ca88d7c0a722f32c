//! Emission of one functional-options builder.
//!
//! For a target type `T` the generated code is a `TOptionsType` holding
//! pending mutations, a `t_options()` constructor that queues every
//! default, one chaining setter per option and a crate-visible `apply`
//! that runs the queue against a `&mut T`. The including module provides
//! the `set_<setter>` methods on `T`.

use heck::ToSnakeCase;

use super::types::{Elision, TypeFormatter};
use super::{RenderError, RustRenderer, module_alias};
use crate::error::{OpgenError, Result};
use crate::mapping::UNRAWABLE_SETTERS;
use crate::model::{BuilderModel, BuilderOption};
use crate::package::FileScope;

/// Renders `model` into `renderer`.
///
/// `scopes` holds one [`FileScope`] per file of the source package, indexed
/// like the package files.
///
/// # Errors
///
/// Returns [`OpgenError::Render`] naming the type and the phase that
/// failed.
pub fn render_builder(
    renderer: &mut RustRenderer,
    model: &BuilderModel<'_>,
    scopes: &[FileScope],
) -> Result<()> {
    let type_name = model.type_name();
    let names = Names::of(type_name);
    let wrap = |phase: &'static str| {
        move |source: RenderError| OpgenError::Render {
            type_name: type_name.to_owned(),
            phase,
            source,
        }
    };

    render_struct(renderer, &names).map_err(wrap("options type"))?;
    render_constructor(renderer, model, &names).map_err(wrap("constructor"))?;
    renderer
        .line("impl $0 {", &[&names.options_type])
        .map_err(wrap("setters"))?;
    for option in model.options() {
        render_setter(renderer, option, type_name, scopes).map_err(wrap("setters"))?;
        renderer.blank();
    }
    render_apply(renderer, type_name).map_err(wrap("apply"))?;
    tracing::debug!(
        type_name,
        options = model.options().len(),
        defaults = model.defaults().len(),
        "rendered builder"
    );
    Ok(())
}

/// Names generated for one target type.
struct Names<'t> {
    target: &'t str,
    options_type: String,
    constructor: String,
}

impl<'t> Names<'t> {
    fn of(target: &'t str) -> Self {
        Self {
            target,
            options_type: format!("{target}OptionsType"),
            constructor: format!("{}_options", target.to_snake_case()),
        }
    }
}

fn render_struct(renderer: &mut RustRenderer, names: &Names<'_>) -> Result<(), RenderError> {
    renderer.line(
        "/// $0 collects pending options for type $1.",
        &[&names.options_type, names.target],
    )?;
    renderer.line("pub struct $0 {", &[&names.options_type])?;
    renderer.line("    opts: Vec<Box<dyn FnOnce(&mut $0)>>,", &[names.target])?;
    renderer.line("}", &[])?;
    renderer.blank();
    Ok(())
}

fn render_constructor(
    renderer: &mut RustRenderer,
    model: &BuilderModel<'_>,
    names: &Names<'_>,
) -> Result<(), RenderError> {
    renderer.line(
        "/// $0 creates the $1 for $2 with every default option applied.",
        &[&names.constructor, &names.options_type, names.target],
    )?;
    renderer.line("#[must_use]", &[])?;
    renderer.line("pub fn $0() -> $1 {", &[&names.constructor, &names.options_type])?;
    renderer.line("    $0 {", &[&names.options_type])?;
    let capacity = model.options().len().to_string();
    renderer.line("        opts: Vec::with_capacity($0),", &[&capacity])?;
    renderer.line("    }", &[])?;
    for default in model.defaults() {
        let module = default.module_path();
        let alias = module_alias(renderer.imports_mut(), module);
        tracing::trace!(module = %module, alias, "default module imported");
        let setter = setter_ident(default.setter())?;
        let template = format!("    .$0(${{{module}}}::$1)");
        renderer.line(&template, &[&setter, default.ident()])?;
    }
    renderer.line("}", &[])?;
    renderer.blank();
    Ok(())
}

fn render_setter(
    renderer: &mut RustRenderer,
    option: &BuilderOption<'_>,
    type_name: &str,
    scopes: &[FileScope],
) -> Result<(), RenderError> {
    let scope = scopes
        .get(option.item().decl().file)
        .ok_or_else(|| RenderError::MissingSourceFile(option.name().to_owned()))?;
    let value_type =
        TypeFormatter::new(scope).format(option.value_type(), Elision::Static, renderer.imports_mut());
    let setter = setter_ident(option.setter())?;

    let mut comment = option.comment().iter();
    if let Some(first) = comment.next() {
        if first.is_empty() {
            renderer.line("    /// $0", &[option.setter()])?;
        } else {
            renderer.line("    /// $0 $1", &[option.setter(), first])?;
        }
        for line in comment {
            if line.is_empty() {
                renderer.line("    ///", &[])?;
            } else {
                renderer.line("    /// $0", &[line])?;
            }
        }
    }
    renderer.line("    #[must_use]", &[])?;
    renderer.line("    pub fn $0(mut self, v: $1) -> Self {", &[&setter, &value_type])?;
    renderer.line(
        "        self.opts.push(Box::new(move |vv: &mut $0| vv.set_$1(v)));",
        &[type_name, option.setter()],
    )?;
    renderer.line("        self", &[])?;
    renderer.line("    }", &[])
}

fn render_apply(renderer: &mut RustRenderer, type_name: &str) -> Result<(), RenderError> {
    renderer.line("    /// apply runs every pending option against `vv`, in order.", &[])?;
    renderer.line("    pub(crate) fn apply(self, vv: &mut $0) {", &[type_name])?;
    renderer.line("        for opt in self.opts {", &[])?;
    renderer.line("            opt(vv);", &[])?;
    renderer.line("        }", &[])?;
    renderer.line("    }", &[])?;
    renderer.line("}", &[])?;
    renderer.blank();
    Ok(())
}

/// Spells `setter` as an identifier, escaping keywords as raw identifiers.
fn setter_ident(setter: &str) -> Result<String, RenderError> {
    if UNRAWABLE_SETTERS.contains(&setter) {
        return Err(RenderError::ReservedSetter(setter.to_owned()));
    }
    if syn::parse_str::<syn::Ident>(setter).is_ok() {
        Ok(setter.to_owned())
    } else {
        Ok(format!("r#{setter}"))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for builder emission helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("name", "name")]
    #[case::keyword("type", "r#type")]
    #[case::reserved_word("async", "r#async")]
    fn spells_setters(#[case] setter: &str, #[case] expected: &str) {
        assert_eq!(setter_ident(setter), Ok(expected.to_owned()));
    }

    #[test]
    fn rejects_unrawable_setters() {
        assert_eq!(
            setter_ident("self"),
            Err(RenderError::ReservedSetter("self".to_owned()))
        );
    }

    #[rstest]
    #[case("Example", "ExampleOptionsType", "example_options")]
    #[case("HTTPServer", "HTTPServerOptionsType", "http_server_options")]
    fn derives_generated_names(
        #[case] type_name: &str,
        #[case] options_type: &str,
        #[case] constructor: &str,
    ) {
        let names = Names::of(type_name);
        assert_eq!(names.options_type, options_type);
        assert_eq!(names.constructor, constructor);
        assert_eq!(names.target, type_name);
    }
}
