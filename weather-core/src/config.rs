use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::provider::ProviderId;

/// Environment variable that supplies the OpenWeather API key.
/// Takes precedence over the key stored on disk and is never written back.
pub const OPENWEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Configuration for a single provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Overrides the provider's public endpoint, e.g. for a proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout. Absent means the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default provider id, e.g. "openweather" or "simulated".
    pub default_provider: Option<String>,

    /// City fetched when the screen opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,

    /// Artificial latency of the simulated provider, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulated_delay_ms: Option<u64>,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// OpenWeather key taken from the environment. Lives only in memory.
    #[serde(skip)]
    env_api_key: Option<String>,
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    ///
    /// With nothing on disk, a key in the environment makes OpenWeather the default.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        match &self.default_provider {
            Some(s) => ProviderId::try_from(s.as_str()),
            None if self.env_api_key.is_some() => Ok(ProviderId::OpenWeather),
            None => Err(anyhow!(
                "No default provider configured.\n\
                 Hint: run `weather configure openweather`, set {OPENWEATHER_API_KEY_ENV}, \
                 or pass `--provider simulated`."
            )),
        }
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Load config from the platform config directory and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load only what is stored in the platform config file, ignoring the environment.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-display", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Fold values from the environment into this config. `lookup` stands in for
    /// `std::env::var` so the precedence rules can be exercised without touching
    /// the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key = lookup(OPENWEATHER_API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if key.is_some() {
            debug!("using OpenWeather API key from {OPENWEATHER_API_KEY_ENV}");
            self.env_api_key = key;
        }
    }

    /// Set/replace a provider API key, keeping any other settings for that provider.
    /// Becomes the default provider if none is set yet.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        match self.providers.get_mut(provider_id.as_str()) {
            Some(cfg) => cfg.api_key = api_key,
            None => {
                let cfg = ProviderConfig {
                    api_key,
                    base_url: None,
                    timeout_secs: None,
                };
                self.providers.insert(provider_id.as_str().to_string(), cfg);
            }
        }

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present. The environment wins over the file.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        match (provider_id, &self.env_api_key) {
            (ProviderId::OpenWeather, Some(key)) => Some(key.as_str()),
            _ => self
                .provider_config(provider_id)
                .map(|cfg| cfg.api_key.as_str()),
        }
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        !provider_id.needs_api_key() || self.provider_api_key(provider_id).is_some()
    }
}
