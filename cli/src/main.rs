//! Bytepair CLI - Command-line interface for BPE training.
//!
//! This is the main entry point for the `bytepair` command-line tool.

mod commands;
mod progress;

use clap::{ArgAction, Parser, Subcommand};
use commands::{DecodeCommand, InspectCommand, TrainCommand};
use env_logger::Env;

#[derive(Parser)]
#[command(name = "bytepair")]
#[command(about = "Train and inspect byte-pair encoding vocabularies", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, global = true, action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn merges from a text file
    Train(TrainCommand),
    /// Decode symbol ids back to text
    Decode(DecodeCommand),
    /// Print the merge table of a saved model
    Inspect(InspectCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Decode(cmd) => commands::decode::run(cmd)?,
        Commands::Inspect(cmd) => commands::inspect::run(cmd)?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if let Some(level) = level_override(verbose, quiet) {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

/// Level forced by `-v`/`-q`; `None` leaves `RUST_LOG` (or the default) in charge.
fn level_override(verbose: u8, quiet: u8) -> Option<log::LevelFilter> {
    use log::LevelFilter;

    match (quiet, verbose) {
        (0, 0) => None,
        (0, 1) => Some(LevelFilter::Debug),
        (0, _) => Some(LevelFilter::Trace),
        (1, _) => Some(LevelFilter::Warn),
        _ => Some(LevelFilter::Error),
    }
}
