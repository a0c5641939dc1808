// ABOUTME: Configuration file loading, validation, and merging for the Clipdrop CLI
// ABOUTME: Reads optional TOML files from the project and XDG locations, then applies flag overrides

use anyhow::{Context, Result, anyhow};
use clipdrop_sdk::constants::{timeouts, urls};
use clipdrop_sdk::ClipdropClientConfig;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const PROJECT_CONFIG_FILE: &str = "clipdrop.toml";
const CONFIG_DIR: &str = "clipdrop";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from the standard locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        // Lowest precedence first so higher-precedence files are merged last
        let ordered: Vec<&str> = paths.iter().rev().map(|p| p.as_str()).collect();
        Self::load_from_paths(&ordered)
    }

    /// Load configuration from file paths, later paths overriding earlier ones.
    ///
    /// Missing files are skipped; files that exist but fail to parse are errors.
    pub fn load_from_paths(paths: &[&str]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !Path::new(path).is_file() {
                continue;
            }
            log::debug!("Loading config from {path}");
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get standard config file paths in order of precedence (highest first)
    pub fn get_config_paths() -> Vec<String> {
        let mut paths = Vec::new();

        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(
                current_dir
                    .join(PROJECT_CONFIG_FILE)
                    .to_string_lossy()
                    .to_string(),
            );
        }

        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home).join(CONFIG_DIR).join(CONFIG_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir.join(".config").join(CONFIG_DIR).join(CONFIG_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            base_url: other.base_url.or(self.base_url),
            version: other.version.or(self.version),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(self, base_url: Option<String>, version: Option<String>) -> Config {
        self.merge(Config {
            base_url,
            version,
            timeout_secs: None,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        if let Some(ref base_url) = self.base_url {
            if base_url.trim().is_empty() {
                return Err(anyhow!("base_url must not be empty"));
            }
        }

        Ok(())
    }

    /// Builds the SDK configuration, leaving unset values at their defaults
    pub fn client_config(&self, api_key: Option<String>) -> ClipdropClientConfig {
        ClipdropClientConfig {
            api_key: api_key.map(|key| SecretString::new(key.into_boxed_str())),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| urls::CLIPDROP_API_BASE.to_string()),
            version: self
                .version
                .clone()
                .unwrap_or_else(|| urls::API_VERSION.to_string()),
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(timeouts::HTTP_REQUEST_TIMEOUT),
        }
    }
}
