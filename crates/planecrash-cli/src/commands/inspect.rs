//! Inspect command - describe a raw export before cleaning it.

use std::path::PathBuf;

use colored::Colorize;
use planecrash::{Parser, Pipeline};

pub fn run(file: PathBuf, json_output: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (raw, source) = Parser::new().parse_file(&file)?;
    let missing = Pipeline::new().missing_columns(&raw);

    if json_output {
        let status = serde_json::json!({
            "source": source,
            "columns": raw.headers,
            "missing_columns": missing,
            "ready": missing.is_empty(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "File:".cyan().bold(),
        source.file.white()
    );
    println!("  Format:  {}", source.format);
    println!("  Rows:    {}", source.row_count);
    println!("  Columns: {}", source.column_count);
    if verbose {
        println!("  Hash:    {}", source.hash.dimmed());
        println!("  Size:    {} bytes", source.size_bytes);
    }

    println!();
    println!("{}", "Columns:".yellow().bold());
    for header in &raw.headers {
        println!("  {}", header);
    }

    println!();
    if missing.is_empty() {
        println!("{}", "All required columns present".green());
    } else {
        println!("{}", "Missing columns:".red().bold());
        for column in &missing {
            println!("  {}", column.red());
        }
    }

    Ok(())
}
