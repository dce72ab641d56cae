//! Inspect command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Inspect command arguments.
#[derive(Parser)]
pub struct InspectCommand {
    /// Directory of a saved model
    #[arg(short, long)]
    pub model: PathBuf,

    /// Show at most this many merges
    #[arg(short, long)]
    pub limit: Option<usize>,
}

use anyhow::{Context, Result as AnyhowResult};
use bytepair_core::BpeModel;
use bytepair_model::io::escape_piece;
use bytepair_model::ModelLoader;

pub fn run(cmd: InspectCommand) -> AnyhowResult<()> {
    let model = ModelLoader::load(&cmd.model)
        .with_context(|| format!("failed to load model from {}", cmd.model.display()))?;

    println!("Vocab size: {}", model.vocab_size());
    println!("Merges:     {}", model.merges().len());
    println!("-----------------");
    for line in merge_lines(&model, cmd.limit.unwrap_or(usize::MAX)) {
        println!("{}", line);
    }

    Ok(())
}

fn merge_lines(model: &BpeModel, limit: usize) -> Vec<String> {
    model
        .merges()
        .iter()
        .take(limit)
        .map(|rule| {
            let piece = model.vocab().get(rule.symbol).unwrap_or_default();
            format!(
                "{:>6} <- ({}, {})  \"{}\"",
                rule.symbol,
                rule.pair.0,
                rule.pair.1,
                escape_piece(piece)
            )
        })
        .collect()
}
