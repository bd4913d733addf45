pub mod models;

pub use models::{ConfigError, SpoofConfig};

use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config/spoof-config.yaml";

impl SpoofConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Missing file means nothing is configured; a malformed file is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No spoof config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: SpoofConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
