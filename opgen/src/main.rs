//! CLI entrypoint for `opgen`.

use clap::Parser;
use opgen::cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    opgen::logging::init()?;
    opgen::run(&args)?;
    Ok(())
}
