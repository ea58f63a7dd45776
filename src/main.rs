use anyhow::{Context, Result};
use clap::Parser;

use pdf_sweep::cli::Args;
use pdf_sweep::config::Settings;
use pdf_sweep::sweep_pdf;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    if !args.input.is_file() {
        anyhow::bail!("input file does not exist: {}", args.input.display());
    }

    let settings = Settings::from_args(&args);
    let output_path = args.output_path();

    let report = sweep_pdf(&args.input, &output_path, &settings)
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    println!(
        "{} pages, {} removed, {} kept",
        report.stats.total, report.stats.removed, report.stats.remaining
    );
    println!(
        "{} KB -> {} KB ({:.1}% smaller)",
        report.input_bytes / 1024,
        report.output_bytes / 1024,
        report.reduction_pct()
    );
    println!("wrote {}", output_path.display());

    Ok(())
}
