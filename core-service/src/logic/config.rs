//! Engine Configuration
//!
//! Tuning knobs for a classification run. Everything here has a default in
//! `constants.rs`; the server overrides from the environment.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_IDENTITY_ALIASES};

/// Configuration shared by the resolver and the chunked engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rows per inference batch (must be >= 1)
    pub batch_size: usize,

    /// Accepted names for the identity (source IP) column
    pub identity_aliases: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            identity_aliases: DEFAULT_IDENTITY_ALIASES
                .iter()
                .map(|alias| alias.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_identity_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identity_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.batch_size, 5000);
        assert!(config.identity_aliases.iter().any(|a| a == "src_ip"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::default()
            .with_batch_size(7)
            .with_identity_aliases(["addr"]);
        assert_eq!(config.batch_size, 7);
        assert_eq!(config.identity_aliases, vec!["addr".to_string()]);
    }
}
