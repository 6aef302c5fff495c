//! planecrash CLI - clean aviation accident archive exports.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            output,
            format,
            config,
            audit,
        } => commands::clean::run(file, output, format, config, audit, cli.verbose),

        Commands::Inspect { file, json } => commands::inspect::run(file, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over the `--verbose` default.
fn init_logging(verbose: bool) {
    let default = if verbose { "planecrash=debug" } else { "planecrash=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
