//! Configuration module

use std::env;
use std::path::PathBuf;

use ddos_shield_core::constants::{DEFAULT_BATCH_SIZE, DEFAULT_IDENTITY_ALIASES};
use ddos_shield_core::logic::dataset::default_staging_dir;
use ddos_shield_core::EngineConfig;

/// Default upload limit (256 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Trained classifier (.json linear model or .onnx)
    pub model_path: PathBuf,

    /// Where the current result set is staged
    pub staging_dir: PathBuf,

    /// Where block reports are written
    pub reports_dir: PathBuf,

    /// Rows per inference batch
    pub batch_size: usize,

    /// Accepted names for the source IP column
    pub identity_columns: Vec<String>,

    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5174),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("model.json")),

            staging_dir: env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_staging_dir()),

            reports_dir: env::var("REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("Reports")),

            batch_size: env::var("BATCH_SIZE")
                .ok()
                .and_then(|b| b.parse().ok())
                .filter(|b| *b > 0)
                .unwrap_or(DEFAULT_BATCH_SIZE),

            identity_columns: env::var("IDENTITY_COLUMNS")
                .ok()
                .map(|v| parse_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or_else(|| DEFAULT_IDENTITY_ALIASES.iter().map(|a| a.to_string()).collect()),

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),

            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Engine settings derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_batch_size(self.batch_size)
            .with_identity_aliases(self.identity_columns.iter().cloned())
    }
}

/// Split a comma separated list, dropping blanks
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list(" ip , src_ip,,IP Address "), vec!["ip", "src_ip", "IP Address"]);
        assert!(parse_list(" , ").is_empty());
    }
}
