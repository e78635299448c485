use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AIProvider {
    Anthropic,
    Offline,
}

impl std::fmt::Display for AIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AIProvider::Anthropic => write!(f, "anthropic"),
            AIProvider::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for AIProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(AIProvider::Anthropic),
            "offline" | "none" => Ok(AIProvider::Offline),
            _ => Err(anyhow!("Unknown AI provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub provider: AIProvider,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            provider: AIProvider::Anthropic,
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: None,
        }
    }
}

impl AiConfig {
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn fill_key_from_env(&mut self) {
        if self.api_key.as_ref().map_or(true, |key| key.is_empty()) {
            self.api_key = std::env::var(API_KEY_ENV).ok();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub ai: AiConfig,
}

impl Config {
    /// Load `config.json` from `data_dir` (default: the user config dir),
    /// writing defaults when the file does not exist yet.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(Self::default_data_dir);

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let config_str =
                std::fs::read_to_string(&config_path).context("Failed to read config.json")?;

            match serde_json::from_str::<Config>(&config_str) {
                Ok(mut config) => {
                    config.data_dir = data_dir;
                    config.ai.fill_key_from_env();
                    return Ok(config);
                }
                Err(e) => {
                    warn!(path = %config_path.display(), error = %e, "unparsable config.json, using defaults");
                    return Ok(Self::defaults(data_dir));
                }
            }
        }

        let config = Self::defaults(data_dir);
        config.save()?;
        info!(path = %config_path.display(), "created default config");
        Ok(config)
    }

    fn default_data_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dem")
    }

    fn defaults(data_dir: PathBuf) -> Self {
        let mut config = Config {
            data_dir,
            ai: AiConfig::default(),
        };
        config.ai.fill_key_from_env();
        config
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.data_dir.join("config.json");
        // never write a key that came from the environment
        let mut on_disk = self.clone();
        if std::env::var(API_KEY_ENV).ok() == on_disk.ai.api_key {
            on_disk.ai.api_key = None;
        }
        let content =
            serde_json::to_string_pretty(&on_disk).context("Failed to serialize config")?;
        std::fs::write(&config_path, content).context("Failed to write config.json")?;
        Ok(())
    }

    /// Directory of the persisted app records
    pub fn state_dir(&self) -> PathBuf {
        self.data_dir.join("state")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_default_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();

        assert!(dir.path().join("config.json").exists());
        assert_eq!(config.ai.model, DEFAULT_MODEL);
        assert_eq!(config.state_dir(), dir.path().join("state"));
    }

    #[test]
    fn test_reads_existing_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"ai": {"provider": "offline", "model": "m", "api_key": "k"}}"#,
        )
        .unwrap();

        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.ai.provider, AIProvider::Offline);
        assert_eq!(config.ai.api_key.as_deref(), Some("k"));
        assert_eq!(config.data_dir, dir.path());
    }

    #[test]
    fn test_broken_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{ nope").unwrap();

        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.ai.provider, AIProvider::Anthropic);
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("Claude".parse::<AIProvider>().unwrap(), AIProvider::Anthropic);
        assert_eq!("none".parse::<AIProvider>().unwrap(), AIProvider::Offline);
        assert!("gpt".parse::<AIProvider>().is_err());
    }
}
