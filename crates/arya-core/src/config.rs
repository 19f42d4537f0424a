use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Arya assistant.
///
/// Loaded from a TOML file by the embedding application. Each section
/// corresponds to one subsystem crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AryaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub photos: PhotosConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub qa: QaConfig,
}

impl AryaConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AryaConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is
    /// missing or unparseable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the menu database and photo tree.
    pub data_dir: String,
    /// Log level hint for the embedding application: trace..error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Mess-menu store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// SQLite database path, relative to the data directory.
    pub db_path: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            db_path: "mess_menu.db".to_string(),
        }
    }
}

/// Photo index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotosConfig {
    /// Root of the category/subcategory photo tree.
    pub photos_dir: String,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            photos_dir: "hostel_photos".to_string(),
        }
    }
}

/// Routing, cache, and history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum number of memoized QA answers.
    pub cache_capacity: usize,
    /// Seconds before a cached answer goes stale.
    pub cache_ttl_secs: u64,
    /// Maximum conversation turns retained in history.
    pub history_max_turns: usize,
    /// Maximum accepted question length in characters.
    pub max_question_chars: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 100,
            cache_ttl_secs: 3600,
            history_max_turns: 50,
            max_question_chars: 2000,
        }
    }
}

/// Settings handed to the external retrieval+generation backend.
///
/// The core never talks to the vector store or model endpoint itself;
/// the embedding application uses this section when it provisions the
/// backend it passes to the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Vector index name.
    pub index_name: String,
    /// Namespace within the index.
    pub namespace: String,
    /// Number of documents retrieved per question.
    pub top_k: usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            index_name: "arya-index".to_string(),
            namespace: "arya-namespace".to_string(),
            top_k: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = AryaConfig::default();
        assert_eq!(config.chat.cache_capacity, 100);
        assert_eq!(config.chat.cache_ttl_secs, 3600);
        assert_eq!(config.chat.history_max_turns, 50);
        assert_eq!(config.photos.photos_dir, "hostel_photos");
        assert_eq!(config.qa.top_k, 3);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AryaConfig::default();
        config.chat.history_max_turns = 20;
        config.menu.db_path = "other.db".to_string();
        config.save(&path).unwrap();

        let loaded = AryaConfig::load(&path).unwrap();
        assert_eq!(loaded.chat.history_max_turns, 20);
        assert_eq!(loaded.menu.db_path, "other.db");
        assert_eq!(loaded.chat.cache_capacity, 100);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(AryaConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = AryaConfig::load_or_default(&path);
        assert_eq!(config.chat.cache_capacity, 100);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[chat]\ncache_capacity = 7\n").unwrap();

        let config = AryaConfig::load(&path).unwrap();
        assert_eq!(config.chat.cache_capacity, 7);
        assert_eq!(config.chat.cache_ttl_secs, 3600);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_malformed_toml_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "chat = [[[").unwrap();

        let config = AryaConfig::load_or_default(&path);
        assert_eq!(config.chat.history_max_turns, 50);
    }
}
