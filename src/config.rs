//! Configuration management for the chat analyzer

use crate::error::{ChatAnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub cors: CorsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Expected model name. Loading fails when the lexicon reports another one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lexicon JSON file. The embedded Spanish lexicon is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allow_any_origin: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            model: ModelConfig {
                name: None,
                path: None,
            },
            cors: CorsConfig {
                allow_any_origin: true,
                allowed_origins: Vec::new(),
                allow_credentials: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the user config directory, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::config_path())
    }

    /// Load `path`, or fall back to defaults and try to persist them.
    /// An unwritable location only costs the saved copy.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Self::default();
        if let Err(e) = config.save_to(path) {
            log::warn!("Could not write default config to {}: {}", path.display(), e);
        }
        Ok(config)
    }

    /// Load an explicit config file. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChatAnalyzerError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ChatAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ChatAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("chat-analyzer")
            .join("config.toml")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert!(config.model.path.is_none());
        assert!(config.model.name.is_none());
        assert!(config.cors.allow_any_origin);
        assert!(config.cors.allow_credentials);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 9100;
        config.model.path = Some(PathBuf::from("/tmp/lexicon.json"));
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.server.port, 9100);
        assert_eq!(loaded.model.path, Some(PathBuf::from("/tmp/lexicon.json")));
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ChatAnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_load_or_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat-analyzer").join("config.toml");

        let config = Config::load_or_init(&path).unwrap();
        assert_eq!(config.server.port, 8000);
        assert!(path.exists());
        assert!(!std::fs::read_to_string(&path).unwrap().contains("name"));
    }

    #[test]
    fn test_load_or_init_unwritable_dir_uses_defaults() {
        let dir = TempDir::new().unwrap();
        // A regular file where the config directory should be
        let blocker = dir.path().join("chat-analyzer");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");

        let config = Config::load_or_init(&path).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert!(!path.exists());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = [broken").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ChatAnalyzerError::Configuration(_))));
    }
}
