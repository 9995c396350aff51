//! Entry point for the abl_stats application.
//! Loads a statistics file, renders the diagnostic figures and optionally exports the averaged profiles.

use abl_stats::analysis;
use abl_stats::metadata::print_fields;
use abl_stats::prelude::*;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if args.list_vars {
        let source = NetCDFSource::open(&args.file)?;
        print_fields(&source.describe()?);
        return Ok(());
    }

    let stats = AblStatsFile::open_with_extrapolation(&args.file, args.extrapolation)?;
    println!("Successfully opened statistics file: {}", args.file.display());

    let config = args.config();
    let mut plotter = SvgPlotter::new(&config.output_dir);
    let report = analysis::run(&stats, &config, &mut plotter)?;

    for figure in &report.figures {
        println!("✅ Saved figure to {}", figure.display());
    }
    if let Some(path) = &report.profile_file {
        println!("✅ Saved profiles to {}", path.display());
    }

    Ok(())
}
