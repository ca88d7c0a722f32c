//! End-to-end tests running the `opgen` binary.
//!
//! Uses `assert_cmd` to run the compiled binary against temporary crate
//! trees and inspects exit status, stderr and the generated file.

use std::process::Output;

use anyhow::{Result, ensure};
use assert_cmd::Command;
use rstest::{fixture, rstest};
use test_helpers::{EXAMPLE_OPTIONS, ModuleTree};

fn opgen(tree: &ModuleTree, args: &[&str]) -> Result<Output> {
    #[expect(deprecated, reason = "cargo_bin is the standard assert_cmd API")]
    let mut cmd = Command::cargo_bin("opgen")?;
    for key in ["OPGEN_SOURCE", "OPGEN_DEST", "OPGEN_MODULE", "OPGEN_LOG"] {
        cmd.env_remove(key);
    }
    cmd.env("RUST_BACKTRACE", "0")
        .env("NO_COLOR", "1")
        .current_dir(tree.root())
        .args(args);
    Ok(cmd.output()?)
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[fixture]
fn example_tree() -> ModuleTree {
    let tree = ModuleTree::new().expect("create module tree");
    tree.write("src/internal/options.rs", EXAMPLE_OPTIONS)
        .expect("write options module");
    tree
}

#[rstest]
fn prints_version(example_tree: ModuleTree) -> Result<()> {
    let output = opgen(&example_tree, &["-v"])?;
    ensure!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    ensure!(
        stdout.trim() == format!("opgen {}", env!("CARGO_PKG_VERSION")),
        "unexpected version output: {stdout}"
    );
    ensure!(!example_tree.exists("src/example_options.rs"));
    Ok(())
}

#[rstest]
fn writes_builder_for_requested_type(example_tree: ModuleTree) -> Result<()> {
    let output = opgen(
        &example_tree,
        &[
            "-s",
            "src/internal/options",
            "-d",
            "src/example_options.rs",
            "Example",
        ],
    )?;
    ensure!(output.status.success(), "stderr: {}", stderr(&output));

    let generated = example_tree.read("src/example_options.rs")?;
    ensure!(generated.starts_with("// Code generated by opgen version "));
    ensure!(generated.contains("pub fn example_options() -> ExampleOptionsType {"));
    ensure!(generated.contains("    .logger(options::ExampleLogger)\n"));
    ensure!(generated.contains("pub fn size(mut self, v: i64) -> Self {"));
    ensure!(!generated.contains(".size(options::ExampleSize)"));
    Ok(())
}

#[rstest]
fn reads_paths_from_environment(example_tree: ModuleTree) -> Result<()> {
    #[expect(deprecated, reason = "cargo_bin is the standard assert_cmd API")]
    let mut cmd = Command::cargo_bin("opgen")?;
    let output = cmd
        .current_dir(example_tree.root())
        .env("OPGEN_SOURCE", "src/internal/options.rs")
        .env("OPGEN_DEST", "gen/options.rs")
        .env("OPGEN_MODULE", "crate::internal::options")
        .arg("Example")
        .output()?;
    ensure!(output.status.success(), "stderr: {}", stderr(&output));
    ensure!(example_tree.exists("gen/options.rs"));
    Ok(())
}

#[rstest]
fn reports_every_validation_issue(example_tree: ModuleTree) -> Result<()> {
    example_tree.write(
        "src/internal/options.rs",
        "pub const ExampleRetries: _ = 3;\npub const ExampleLabel: _ = \"x\";\n",
    )?;
    let output = opgen(
        &example_tree,
        &["-s", "src/internal/options.rs", "-d", "src/out.rs", "Example"],
    )?;

    ensure!(output.status.code() == Some(1));
    let text = stderr(&output);
    ensure!(text.contains("untyped integer constant ExampleRetries"), "stderr: {text}");
    ensure!(text.contains("untyped string constant ExampleLabel"), "stderr: {text}");
    ensure!(text.contains("generation failed: 2 validation issues"), "stderr: {text}");
    ensure!(!example_tree.exists("src/out.rs"));
    Ok(())
}

#[rstest]
#[case::missing_module(&["-s", "src/absent", "-d", "src/out.rs", "Example"], 1, "no module")]
#[case::bad_destination(&["-s", "src/internal/options", "-d", "src/out.txt", "Example"], 2, "invalid rust file name")]
#[case::bad_type(&["-s", "src/internal/options", "-d", "src/out.rs", "Bad-Type"], 2, "invalid type name")]
#[case::no_types(&["-s", "src/internal/options", "-d", "src/out.rs"], 2, "TYPE")]
fn rejects_bad_invocations(
    example_tree: ModuleTree,
    #[case] args: &[&str],
    #[case] code: i32,
    #[case] needle: &str,
) -> Result<()> {
    let output = opgen(&example_tree, args)?;
    ensure!(output.status.code() == Some(code), "status: {:?}", output.status);
    let text = stderr(&output);
    ensure!(text.contains(needle), "stderr: {text}");
    ensure!(!example_tree.exists("src/out.rs"));
    Ok(())
}
