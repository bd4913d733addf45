use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Values the host reads from its device configuration before the engine is first used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoofConfig {
    /// Fingerprint of a certified build. Empty disables the certified override.
    pub certified_fingerprint: String,
    pub certified_model: String,
    /// Fingerprint of the stock firmware. Empty disables the stock override.
    pub stock_fingerprint: String,
    pub spoof_google_apps: bool,
}

impl SpoofConfig {
    pub fn has_certified_fingerprint(&self) -> bool {
        !self.certified_fingerprint.is_empty()
    }

    pub fn has_stock_fingerprint(&self) -> bool {
        !self.stock_fingerprint.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}
