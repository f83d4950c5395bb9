use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use moneymap::config::{data_dir, load_or_default};
use moneymap::generator::{run, GeneratorPaths};

/// Expands archetypes and modifiers into the generated variants table.
#[derive(Parser, Debug)]
#[clap(name = "generate-variants")]
struct Args {
    /// Dataset directory; inputs and output default to its `variants/` folder
    #[clap(long, env = "MONEY_MAP_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[clap(long, value_name = "FILE")]
    archetypes: Option<PathBuf>,

    #[clap(long, value_name = "FILE")]
    modifiers: Option<PathBuf>,

    /// Where to write the generated JSON table
    #[clap(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    moneymap::logging::init();
    let args = Args::parse();
    let config = load_or_default()?;

    let root = args.data_dir.unwrap_or_else(|| data_dir(&config));
    let defaults = GeneratorPaths::in_data_dir(&root);
    let paths = GeneratorPaths {
        archetypes: args.archetypes.unwrap_or(defaults.archetypes),
        modifiers: args.modifiers.unwrap_or(defaults.modifiers),
        output: args.output.unwrap_or(defaults.output),
    };

    let generation = run(&paths, &config.generator)?;
    print!("{}", generation.report);
    println!("\nWrote {} variants to {}", generation.variants.len(), paths.output.display());

    Ok(ExitCode::from(generation.report.exit_status()))
}
