//! Builder model handed to the renderer for one target type.

use syn::Type;

use crate::comments::CommentExtractor;
use crate::mapping::{OptionItem, OptionKind, TargetType};
use crate::names::ModulePath;
use crate::package::SourcePackage;

/// A setter to generate, with its documentation.
#[derive(Debug, Clone)]
pub struct BuilderOption<'m> {
    item: &'m OptionItem,
    comment: Vec<String>,
}

impl<'m> BuilderOption<'m> {
    /// The admitted option behind this setter.
    #[must_use]
    pub const fn item(&self) -> &'m OptionItem {
        self.item
    }

    /// Declared name of the option.
    #[must_use]
    pub fn name(&self) -> &'m str {
        self.item.name()
    }

    /// Setter method name.
    #[must_use]
    pub fn setter(&self) -> &'m str {
        self.item.setter()
    }

    /// Setter parameter type as declared in the source module.
    #[must_use]
    pub const fn value_type(&self) -> &'m Type {
        self.item.value_type()
    }

    /// Normalized doc lines, empty when undocumented.
    #[must_use]
    pub fn comment(&self) -> &[String] {
        &self.comment
    }
}

/// A default applied by the generated constructor.
#[derive(Debug, Clone, Copy)]
pub struct BuilderDefault<'m> {
    item: &'m OptionItem,
    module_path: &'m ModulePath,
}

impl<'m> BuilderDefault<'m> {
    /// Setter that receives the default.
    #[must_use]
    pub fn setter(&self) -> &'m str {
        self.item.setter()
    }

    /// Module declaring the default value.
    #[must_use]
    pub const fn module_path(&self) -> &'m ModulePath {
        self.module_path
    }

    /// Identifier of the default value inside its module.
    #[must_use]
    pub fn ident(&self) -> &'m str {
        self.item.name()
    }

    /// Declaration kind, either a constant or a function.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        self.item.kind()
    }
}

/// Everything the renderer needs to emit one builder.
#[derive(Debug, Clone)]
pub struct BuilderModel<'m> {
    type_name: &'m str,
    options: Vec<BuilderOption<'m>>,
    defaults: Vec<BuilderDefault<'m>>,
}

impl<'m> BuilderModel<'m> {
    /// Assembles the model of `target`.
    ///
    /// Every option becomes a setter. Constants and functions are also
    /// defaults; statics are only settable explicitly. Both lists keep
    /// declaration order.
    #[must_use]
    pub fn assemble(package: &'m SourcePackage, target: &'m TargetType) -> Self {
        let extractor = CommentExtractor::new(package);
        let options = target
            .options()
            .iter()
            .map(|item| BuilderOption {
                item,
                comment: extractor.extract(item),
            })
            .collect();
        let defaults = target
            .options()
            .iter()
            .filter(|item| item.kind().is_default())
            .map(|item| BuilderDefault {
                item,
                module_path: package.module_path(),
            })
            .collect();

        Self {
            type_name: target.name(),
            options,
            defaults,
        }
    }

    /// Name of the target type.
    #[must_use]
    pub const fn type_name(&self) -> &'m str {
        self.type_name
    }

    /// Setters in declaration order.
    #[must_use]
    pub fn options(&self) -> &[BuilderOption<'m>] {
        &self.options
    }

    /// Defaults in declaration order.
    #[must_use]
    pub fn defaults(&self) -> &[BuilderDefault<'m>] {
        &self.defaults
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for builder model assembly.

    use super::*;
    use crate::issues::CollectingReporter;
    use crate::mapping::map_options;
    use crate::names::TypeName;
    use crate::package::SourceFile;
    use crate::symbols::SymbolTable;
    use anyhow::{Result, anyhow, ensure};

    const SOURCE: &str = r#"
/// ExampleName sets example name.
pub const ExampleName: &str = "example";

/// ExampleLogger sets a logger for an example.
pub fn ExampleLogger(err: std::io::Error) {}

pub static ExampleSize: i64 = 0;

pub fn ExampleHook(value: u8) {}
"#;

    #[test]
    fn partitions_defaults_and_keeps_order() -> Result<()> {
        let file = SourceFile::parse("src/options.rs", SOURCE)?;
        let package = SourcePackage::new("crate::options".parse()?, vec![file]);
        let table = SymbolTable::build(&package);
        let types: Vec<TypeName> = vec!["Example".parse()?];
        let mut reporter = CollectingReporter::default();
        let mapping = map_options(&package, &table, &types, &mut reporter)?;
        let target = mapping
            .get("Example")
            .ok_or_else(|| anyhow!("Example missing"))?;

        let model = BuilderModel::assemble(&package, target);
        ensure!(model.type_name() == "Example");

        let setters: Vec<&str> = model.options().iter().map(BuilderOption::setter).collect();
        ensure!(setters == ["name", "logger", "size", "hook"], "{setters:?}");

        let defaults: Vec<&str> = model.defaults().iter().map(BuilderDefault::ident).collect();
        ensure!(
            defaults == ["ExampleName", "ExampleLogger", "ExampleHook"],
            "{defaults:?}"
        );
        ensure!(
            model
                .defaults()
                .iter()
                .all(|default| default.module_path().to_string() == "crate::options")
        );

        let comments: Vec<&[String]> = model.options().iter().map(BuilderOption::comment).collect();
        ensure!(
            comments
                .first()
                .is_some_and(|lines| lines.iter().map(String::as_str).eq(["sets example name."]))
        );
        ensure!(comments.get(2).is_some_and(|lines| lines.is_empty()));
        Ok(())
    }

    #[test]
    fn statics_only_model_has_no_defaults() -> Result<()> {
        let file = SourceFile::parse("src/options.rs", "pub static ExampleSize: i64 = 0;\n")?;
        let package = SourcePackage::new("crate::options".parse()?, vec![file]);
        let table = SymbolTable::build(&package);
        let types: Vec<TypeName> = vec!["Example".parse()?];
        let mut reporter = CollectingReporter::default();
        let mapping = map_options(&package, &table, &types, &mut reporter)?;
        let target = mapping
            .get("Example")
            .ok_or_else(|| anyhow!("Example missing"))?;

        let model = BuilderModel::assemble(&package, target);
        ensure!(model.options().len() == 1);
        ensure!(model.defaults().is_empty());
        Ok(())
    }
}
