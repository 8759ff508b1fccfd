use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

mod config;
mod plotting;
mod workflow;

/// Whole-lake primary production for a batch of ponds.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Run request with the production settings
    #[arg(long, default_value = "lakeforge-app/request.yaml")]
    request: PathBuf,

    /// Directory of pond YAML files
    #[arg(long, default_value = "./data/ponds")]
    data_dir: PathBuf,

    /// Each run writes into a timestamped directory below this one
    #[arg(long, default_value = "./data/runs")]
    output_root: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("--- Lakeforge Application ---");

    let request = config::RunRequest::load(&args.request)?;
    let library = config::PondLibrary::load(&args.data_dir)?;

    let output_dir = args.output_root.join(format!(
        "lakeforge_{}",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    // Copy the request file to the output directory for traceability
    fs::copy(&args.request, output_dir.join("request.yaml"))
        .with_context(|| format!("Failed to copy {}", args.request.display()))?;

    let run = workflow::run_batch(&library, &request, &output_dir)?;
    workflow::write_reports(&run, &request, &output_dir)?;

    println!("\nWorkflow complete. Results are in '{}'", output_dir.display());

    Ok(())
}
