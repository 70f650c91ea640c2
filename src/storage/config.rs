use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub storage: StorageConfig,
    pub ui: UiConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: String,
    pub date_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daybook")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daybook");
        let export_dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            storage: StorageConfig {
                database_path: data_dir.join("daybook.db"),
            },
            ui: UiConfig {
                theme: "default".to_string(),
                date_format: "%B %d, %Y".to_string(),
            },
            export: ExportConfig {
                directory: export_dir,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_default_theme() {
        let config = Config::default();
        assert_eq!(config.ui.theme, "default");
    }

    #[test]
    fn default_database_lives_in_daybook_dir() {
        let config = Config::default();
        assert!(config.storage.database_path.ends_with("daybook/daybook.db"));
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [storage]
            database_path = "/tmp/daybook.db"

            [ui]
            theme = "nord"
            date_format = "%d/%m/%Y"

            [export]
            directory = "/tmp/exports"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.storage.database_path, PathBuf::from("/tmp/daybook.db"));
        assert_eq!(config.ui.theme, "nord");
        assert_eq!(config.export.directory, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn saved_config_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daybook").join("config.toml");
        let config = Config::default();

        config.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(Config::from_toml(&content).unwrap(), config);
    }
}
