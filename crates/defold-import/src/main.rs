// defold-import: command line entry point for the asset importer.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "defold-import",
    about = "Projects Aseprite, ink and CSV assets into Defold files"
)]
struct Args {
    /// Asset directory to import.
    root: PathBuf,

    /// Folder to output to.
    #[arg(long, default_value = "import")]
    output: PathBuf,

    /// Log every generated file.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    defold_import::run(&args.root, &args.output)
}
