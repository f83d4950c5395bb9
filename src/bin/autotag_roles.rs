use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use moneymap::config::{data_dir, load_or_default};
use moneymap::data::{read_yaml, write_yaml};
use moneymap::model::{RawVariant, VariantsFile};
use moneymap::tagging::{backfill_role_families, role_classifier_from_settings, BackfillOptions};

/// Fills `activity_profile.role_family` in a variants YAML file.
#[derive(Parser, Debug)]
#[clap(name = "autotag-roles")]
struct Args {
    /// Variants file; defaults to `variants.yaml` in the data directory
    #[clap(long, value_name = "FILE")]
    path: Option<PathBuf>,

    /// Overwrite role families that are already set
    #[clap(long)]
    force: bool,

    /// Print the scoring breakdown of every classified record
    #[clap(long)]
    debug: bool,
}

fn main() -> Result<()> {
    moneymap::logging::init();
    let args = Args::parse();
    let config = load_or_default()?;
    let path = args
        .path
        .unwrap_or_else(|| data_dir(&config).join("variants.yaml"));

    let classifier = role_classifier_from_settings(&config.role_classifier)?;
    let mut file: VariantsFile<RawVariant> = read_yaml(&path)?;
    for record in &mut file.variants {
        record.ensure_activity_profile();
    }

    let report = backfill_role_families(
        &mut file.variants,
        &classifier,
        BackfillOptions {
            force: args.force,
            debug: args.debug,
        },
    );

    if args.debug {
        for decision in &report.decisions {
            if let Some(line) = decision.explain() {
                println!("{line}");
            }
        }
    }

    if report.updated {
        write_yaml(&path, &file)?;
        println!("Updated {}", path.display());
    }

    println!();
    print!("{report}");
    Ok(())
}
