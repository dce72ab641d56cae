//! Training configuration.

use bytepair_core::{BpeError, Result, Symbol, BYTE_SYMBOLS};
use serde::{Deserialize, Serialize};

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Target vocabulary size, byte symbols included
    pub vocab_size: usize,
    /// Whether to count pairs with rayon on large sequences
    pub parallel: bool,
    /// Log progress every N merges
    pub log_interval: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: BYTE_SYMBOLS + 20,
            parallel: true,
            log_interval: 10,
        }
    }
}

impl TrainingConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::new()
    }

    /// Default configuration with the given vocabulary size.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self {
            vocab_size,
            ..Default::default()
        }
    }

    /// Number of merges the target vocabulary size asks for.
    ///
    /// Sizes up to 256 mean no merges at all.
    #[inline]
    pub fn num_merges(&self) -> usize {
        self.vocab_size.saturating_sub(BYTE_SYMBOLS)
    }

    /// Check that every symbol the merges would mint fits in a [`Symbol`].
    pub fn validate(&self) -> Result<()> {
        if self.vocab_size > Symbol::MAX as usize {
            return Err(BpeError::InvalidConfig(format!(
                "vocab_size {} exceeds the largest symbol id {}",
                self.vocab_size,
                Symbol::MAX
            )));
        }
        Ok(())
    }
}

/// Builder for [`TrainingConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Enable or disable parallel pair counting.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set how many merges pass between progress log lines.
    pub fn log_interval(mut self, interval: usize) -> Self {
        self.config.log_interval = interval;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<TrainingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.vocab_size, 276);
        assert_eq!(config.num_merges(), 20);
        assert!(config.parallel);
    }

    #[test]
    fn test_small_vocab_means_no_merges() {
        assert_eq!(TrainingConfig::with_vocab_size(256).num_merges(), 0);
        assert_eq!(TrainingConfig::with_vocab_size(10).num_merges(), 0);
        assert_eq!(TrainingConfig::with_vocab_size(0).num_merges(), 0);
        assert!(TrainingConfig::builder().vocab_size(0).build().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = TrainingConfig::builder()
            .vocab_size(1000)
            .parallel(false)
            .log_interval(50)
            .build()
            .unwrap();

        assert_eq!(config.vocab_size, 1000);
        assert_eq!(config.num_merges(), 744);
        assert!(!config.parallel);
        assert_eq!(config.log_interval, 50);
    }

    #[test]
    fn test_builder_rejects_unrepresentable_vocab() {
        let err = TrainingConfig::builder()
            .vocab_size(Symbol::MAX as usize + 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, BpeError::InvalidConfig(_)));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: TrainingConfig = serde_json::from_str(r#"{ "vocab_size": 512 }"#).unwrap();
        assert_eq!(config.vocab_size, 512);
        assert!(config.parallel);
        assert_eq!(config.log_interval, 10);
    }
}
