//! Clean command - run the pipeline over a raw export and write the result.

use std::path::{Path, PathBuf};

use colored::Colorize;
use planecrash::{AccidentType, Parser, Pipeline, PipelineConfig, TableWriter};
use tracing::debug;

use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    config: Option<PathBuf>,
    audit: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = match config {
        Some(path) => PipelineConfig::load(&path)?,
        None => PipelineConfig::default(),
    };

    println!(
        "{} {}",
        "Cleaning".cyan().bold(),
        file.display().to_string().white()
    );

    let (raw, source) = Parser::new().parse_file(&file)?;
    let (cleaned, report) = Pipeline::with_config(config).run(&raw)?;

    let format: planecrash::OutputFormat = format.into();
    let output_path = output.unwrap_or_else(|| default_output_path(&file, format.extension()));
    TableWriter::new(format).write_file(&cleaned, &output_path)?;
    debug!(output = %output_path.display(), format = %format.extension(), "Wrote cleaned table");

    println!(
        "Read {} rows, {} columns ({})",
        source.row_count.to_string().white().bold(),
        source.column_count,
        source.format
    );

    println!(
        "Changed {} values across {} steps",
        report.values_changed.to_string().white().bold(),
        report.steps_applied
    );

    if verbose {
        println!();
        println!("{}", "Steps:".yellow().bold());
        for change in &report.changes {
            println!("  {:22} {:>6}  {}", change.step.name(), change.values_changed, change.description);
        }
    }

    println!();
    println!("{}", "Accident phases:".yellow().bold());
    for (phase, count) in &report.accident_types {
        let label = match phase {
            AccidentType::Unknown => phase.label().dimmed(),
            AccidentType::TakeOff => phase.label().green(),
            AccidentType::Landing => phase.label().blue(),
            AccidentType::Other => phase.label().white(),
        };
        println!("  {:>2} {:10} {}", phase.code(), label, count);
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    if audit {
        let report_path = output_path.with_extension("report.json");
        std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
        println!(
            "{} {}",
            "Report saved to".green().bold(),
            report_path.display().to_string().white()
        );
    }

    Ok(())
}

/// `<dir>/<stem>_clean.<ext>` next to the input.
fn default_output_path(file: &Path, ext: &str) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    file.with_file_name(format!("{}_clean.{}", stem, ext))
}
