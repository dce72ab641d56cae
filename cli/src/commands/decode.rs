//! Decode command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Directory of a saved model
    #[arg(short, long)]
    pub model: PathBuf,

    /// Symbol ids to decode (comma-separated)
    #[arg(short, long)]
    pub tokens: String,
}

use anyhow::{Context, Result as AnyhowResult};
use bytepair_core::Symbol;
use bytepair_model::ModelLoader;

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let model = ModelLoader::load(&cmd.model)
        .with_context(|| format!("failed to load model from {}", cmd.model.display()))?;

    let ids = parse_ids(&cmd.tokens)?;
    let text = model.decode(&ids)?;

    println!("{}", text);

    Ok(())
}

/// Parse a comma-separated id list; blank entries are skipped.
fn parse_ids(raw: &str) -> AnyhowResult<Vec<Symbol>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Symbol>()
                .with_context(|| format!("invalid symbol id {:?}", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("256, 97,98").unwrap(), vec![256, 97, 98]);
        assert_eq!(parse_ids("1,,2,").unwrap(), vec![1, 2]);
        assert!(parse_ids("").unwrap().is_empty());
        assert!(parse_ids("1,x").is_err());
        assert!(parse_ids("-1").is_err());
    }
}
