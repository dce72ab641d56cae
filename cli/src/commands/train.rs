//! Train command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the UTF-8 training text
    pub input: PathBuf,

    /// Target vocabulary size (256 byte symbols plus one per merge)
    #[arg(long)]
    pub vocab_size: Option<usize>,

    /// JSON file with a training configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Count pairs on the calling thread only
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    /// Directory to save the trained model into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the merged symbol sequence
    #[arg(long, default_value_t = false)]
    pub dump_sequence: bool,

    /// Number of initial pairs to show
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

use crate::progress::ProgressObserver;
use anyhow::{Context, Result as AnyhowResult};
use bytepair_core::Pair;
use bytepair_model::io::escape_piece;
use bytepair_model::ModelSaver;
use bytepair_training::{BpeTrainer, Termination, TrainingConfig};
use std::fs;
use std::time::Instant;

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let config = resolve_config(&cmd)?;

    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input.display()))?;
    log::info!("Read {} bytes from {}", text.len(), cmd.input.display());

    println!("-----------------");
    println!("Original text length: {} chars", text.chars().count());
    println!("Original byte length: {}", text.len());
    println!("Target vocab size:    {}", config.vocab_size);

    let trainer = BpeTrainer::from_text(config.clone(), &text)?;

    let counts = trainer.pair_counts();
    if cmd.top > 0 {
        println!("-----------------");
        println!("Most frequent pairs:");
        for (pair, count) in counts.ranked().into_iter().take(cmd.top) {
            println!("  {:>12} x{:<8} {}", format!("{:?}", pair), count, render_pair(pair));
        }
    }

    let start = Instant::now();
    let observer = ProgressObserver::new(!cmd.no_progress, config.log_interval);
    let trained = trainer.train(observer)?;
    log::info!("Training completed in {:.2}s", start.elapsed().as_secs_f64());

    println!("-----------------");
    if let Termination::Exhausted { merges } = trained.termination() {
        println!(
            "Stopped after {} of {} merges: no adjacent pairs left",
            merges,
            config.num_merges()
        );
    }
    println!("Merges learned:       {}", trained.merges().len());
    println!("Original length:      {}", trained.original_len());
    println!("Merged length:        {}", trained.ids().len());
    println!("Compression ratio:    {:.2}x", trained.compression_ratio());

    if cmd.dump_sequence {
        println!("-----------------");
        println!("Merged sequence:");
        println!("{:?}", trained.ids());
    }

    println!("-----------------");
    println!("Decoded text:");
    println!("{}", trained.decoded()?);

    if let Some(dir) = &cmd.output {
        let saver = ModelSaver::new(trained.model());
        saver.save(dir)?;
        saver.save_vocab_listing(dir)?;
        println!("-----------------");
        println!("Model saved to {}", dir.display());
    }

    Ok(())
}

fn resolve_config(cmd: &TrainCommand) -> AnyhowResult<TrainingConfig> {
    let mut config = match &cmd.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<TrainingConfig>(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => TrainingConfig::default(),
    };

    if let Some(vocab_size) = cmd.vocab_size {
        config.vocab_size = vocab_size;
    }
    if cmd.sequential {
        config.parallel = false;
    }
    config.validate()?;
    Ok(config)
}

/// Show a pair of byte symbols as escaped text.
fn render_pair(pair: Pair) -> String {
    let bytes: Vec<u8> = [pair.0, pair.1]
        .into_iter()
        .filter_map(|s| u8::try_from(s).ok())
        .collect();
    format!("\"{}\"", escape_piece(&bytes))
}
