//! Application configuration
//!
//! User settings and preferences stored in TOML format under the
//! platform config directory. Only page-session preferences live here:
//! the theme and the language preselected in the picker.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ocr::OcrLanguage;
use crate::page::theme::ThemeMode;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Recognition settings
    pub ocr: OcrSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Visual theme applied at startup
    pub theme: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
        }
    }
}

/// Recognition-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Language preselected in the picker (traineddata code)
    pub default_language: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            default_language: OcrLanguage::default().code().to_string(),
        }
    }
}

impl OcrSettings {
    /// Parsed default language, falling back to English for unknown codes
    pub fn language(&self) -> OcrLanguage {
        OcrLanguage::from_code(&self.default_language).unwrap_or_default()
    }
}

/// Path of the settings file, creating the config directory if needed
pub fn config_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "texttrack", "TextTrack")
        .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.theme, ThemeMode::Dark);
        assert_eq!(config.ocr.default_language, "eng");
        assert_eq!(config.ocr.language(), OcrLanguage::English);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = AppConfig::default();
        config.general.theme = ThemeMode::Light;
        config.ocr.default_language = "jpn".to_string();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.general.theme, ThemeMode::Light);
        assert_eq!(parsed.ocr.default_language, "jpn");
        assert_eq!(parsed.ocr.language(), OcrLanguage::Japanese);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[general]\ntheme = \"light\"\n\n[ocr]\ndefault_language = \"deu\"\n"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.general.theme, ThemeMode::Light);
        assert_eq!(config.ocr.language(), OcrLanguage::German);
    }

    #[test]
    fn test_save_and_reload_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.ocr.default_language = "fra".to_string();
        save_config(&config, &path).unwrap();

        let reloaded = load_config(&path).unwrap();
        assert_eq!(reloaded.ocr.language(), OcrLanguage::French);
    }

    #[test]
    fn test_unknown_language_code_falls_back_to_english() {
        let settings = OcrSettings {
            default_language: "xyz".to_string(),
        };
        assert_eq!(settings.language(), OcrLanguage::English);
    }
}
