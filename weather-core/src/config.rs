use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::secret::WEATHER_API_KEY_SECRET;

/// Secrets Manager region used when nothing else is configured.
pub const DEFAULT_REGION: &str = "eu-north-1";

/// Environment variable overriding the Secrets Manager region.
pub const REGION_ENV: &str = "WEATHER_SECRETS_REGION";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional Secrets Manager region, e.g. "eu-north-1".
    pub region: Option<String>,

    /// Secret strings for local runs, keyed by secret id.
    ///
    /// Example TOML:
    /// [secrets]
    /// WeatherApiKey = '{"WeatherApiKey":"..."}'
    #[serde(default)]
    pub secrets: HashMap<String, String>,
}

impl Config {
    /// Configuration for the deployed function: environment only, no file.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            region: lookup(REGION_ENV).filter(|r| !r.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Region to reach Secrets Manager in.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Store the weather API key in the same shape Secrets Manager holds it.
    pub fn set_api_key(&mut self, api_key: &str) {
        let secret = serde_json::json!({ WEATHER_API_KEY_SECRET: api_key }).to_string();
        self.secrets.insert(WEATHER_API_KEY_SECRET.to_string(), secret);
    }

    pub fn secret_string(&self, secret_id: &str) -> Option<&str> {
        self.secrets.get(secret_id).map(String::as_str)
    }

    pub fn is_api_key_configured(&self) -> bool {
        self.secret_string(WEATHER_API_KEY_SECRET).is_some()
    }
}
