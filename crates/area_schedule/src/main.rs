use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use area_schedule::{
    Config, DEFAULT_OUTPUT_FILE, ScheduleError, Variant, collect_csv_files, generate,
    inputs_missing,
};

#[derive(Parser)]
#[command(author, version, about = "Generate an SVG area schedule from floor area CSV files", long_about = None)]
struct Args {
    /// CSV files to read, in document order
    inputs: Vec<PathBuf>,

    /// Read every CSV file of a directory (sorted by name)
    #[arg(short, long, conflicts_with = "inputs")]
    dir: Option<PathBuf>,

    /// Schedule layout
    #[arg(short, long, value_enum, default_value_t = Variant::Floor)]
    variant: Variant,

    /// SVG file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// TOML file overriding layout, style, units and column names
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Heading text
    #[arg(short, long)]
    title: Option<String>,

    /// Skip the per-group summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path, args.variant)?,
        None => Config::for_variant(args.variant),
    };
    if args.title.is_some() {
        config.title = args.title.clone();
    }

    let inputs = match &args.dir {
        Some(dir) => match collect_csv_files(dir) {
            Ok(files) => files,
            Err(ScheduleError::InputNotFound(path)) => {
                error!("No CSV files found in {}", path.display());
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to list input directory"),
        },
        None => args.inputs.clone(),
    };

    let report = match generate(&inputs, &args.output, &config) {
        Ok(report) => report,
        Err(e) if inputs_missing(&e, &inputs) => {
            match e {
                ScheduleError::InputNotFound(path) => {
                    error!("Error: CSV file '{}' not found!", path.display())
                }
                ScheduleError::NoInputs => error!("No CSV files given"),
                _ => error!("None of the {} CSV file(s) were found", inputs.len()),
            }
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to generate area schedule"),
    };

    info!("Processed {} file(s)", report.files.len());
    if !args.quiet {
        for line in report.summary_lines() {
            println!("{line}");
        }
    }
    println!("\nFile saved as: {}", report.output.display());

    Ok(())
}
