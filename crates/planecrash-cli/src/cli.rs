//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// planecrash: clean aviation accident archive exports
#[derive(Parser)]
#[command(name = "planecrash")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the cleaning pipeline and write the cleaned table
    Clean {
        /// Path to the raw archive export (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for cleaned data (default: <file>_clean.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Pipeline configuration (JSON); absent keys take defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the cleaning report next to the output
        #[arg(long)]
        audit: bool,
    },

    /// Show what a raw export contains and whether it can be cleaned
    Inspect {
        /// Path to the raw archive export (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl From<OutputFormat> for planecrash::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => planecrash::OutputFormat::Csv,
            OutputFormat::Tsv => planecrash::OutputFormat::Tsv,
            OutputFormat::Json => planecrash::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_command() {
        let cli = Cli::parse_from([
            "planecrash",
            "clean",
            "crashes.csv",
            "-f",
            "json",
            "--audit",
        ]);
        match cli.command {
            Commands::Clean {
                file,
                format,
                audit,
                output,
                ..
            } => {
                assert_eq!(file, PathBuf::from("crashes.csv"));
                assert!(matches!(format, OutputFormat::Json));
                assert!(audit);
                assert!(output.is_none());
            }
            _ => panic!("expected clean command"),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!("xlsx".parse::<OutputFormat>().is_err());
        assert!(matches!("TSV".parse::<OutputFormat>(), Ok(OutputFormat::Tsv)));
    }
}
