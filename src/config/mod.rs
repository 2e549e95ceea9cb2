// Configuration module

mod models;

pub use models::*;

use crate::error::{Result, ServiceError};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (`STUDYGENIUS_*`, highest)
    /// 2. Config file (`~/.studygenius/config.toml`, if present)
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name(&Self::default_config_path()).required(false))
            .add_source(Environment::with_prefix("STUDYGENIUS").separator("_"))
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServiceError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".studygenius")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.logging.level, "info");
        assert!(config.server.max_body_bytes >= 6 * 1024 * 1024);
    }
}
