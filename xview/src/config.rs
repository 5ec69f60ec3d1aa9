//! Global configuration.
//!
//! Loaded once from `xview.toml` in the working directory. If the file doesn't exist
//! or can't be parsed, defaults are used.
//!
//! ```toml
//! [general]
//! cache_templates = true
//! anchor_columns_threshold = 4
//! ```
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

static CONFIG: OnceCell<Config> = OnceCell::new();

const CONFIG_FILES: [&str; 2] = ["xview.toml", "Xview.toml"];

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config file not found")]
    Io(#[from] std::io::Error),

    #[error("config not found")]
    NoConfig,
}

/// Global configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    path: Option<PathBuf>,
    pub general: General,
}

#[derive(Debug, Clone)]
pub struct General {
    /// Stderr is a terminal, so output can be colored.
    pub tty: bool,
    /// Keep compiled templates in memory.
    pub cache_templates: bool,
    /// Articles with more paragraphs than this get two columns of anchors.
    pub anchor_columns_threshold: usize,
}

impl Default for General {
    fn default() -> Self {
        Self {
            tty: std::io::stderr().is_terminal(),
            cache_templates: GeneralConfig::default_cache_templates(),
            anchor_columns_threshold: GeneralConfig::default_anchor_columns_threshold(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found in the working directory.
    pub fn load() -> Result<Config, Error> {
        let path = CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
            .ok_or(Error::NoConfig)?;

        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: impl AsRef<Path> + Copy) -> Result<Config, Error> {
        let config_file = ConfigFile::load(path)?;
        let mut config = Config::default();

        config.path = Some(path.as_ref().to_owned());
        config.general.cache_templates = config_file.general.cache_templates;
        config.general.anchor_columns_threshold = config_file.general.anchor_columns_threshold;

        Ok(config)
    }

    /// Where the configuration was loaded from, if it came from a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn log_info(&self) {
        match self.path {
            Some(ref path) => info!("Configuration loaded from \"{}\"", path.display()),
            None => info!("Configuration file not found, using defaults"),
        }

        info!(
            "Template cache is {}",
            if self.general.cache_templates {
                "enabled"
            } else {
                "disabled"
            }
        );
    }
}

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().unwrap_or_default())
}

#[derive(Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralConfig,
}

impl ConfigFile {
    pub fn load(path: impl AsRef<Path> + Copy) -> Result<ConfigFile, Error> {
        let file = read_to_string(path)?;
        let config: Self = toml::from_str(&file)?;

        Ok(config)
    }
}

#[derive(Serialize, Deserialize)]
struct GeneralConfig {
    #[serde(default = "GeneralConfig::default_cache_templates")]
    cache_templates: bool,
    #[serde(default = "GeneralConfig::default_anchor_columns_threshold")]
    anchor_columns_threshold: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_templates: Self::default_cache_templates(),
            anchor_columns_threshold: Self::default_anchor_columns_threshold(),
        }
    }
}

impl GeneralConfig {
    fn default_cache_templates() -> bool {
        #[cfg(debug_assertions)]
        return false;
        #[cfg(not(debug_assertions))]
        return true;
    }

    fn default_anchor_columns_threshold() -> usize {
        4
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_load_from() -> Result<(), Error> {
        let dir = TempDir::new("xview-config")?;
        let path = dir.path().join("xview.toml");
        std::fs::write(
            &path,
            "[general]\ncache_templates = true\nanchor_columns_threshold = 10\n",
        )?;

        let config = Config::load_from(&path)?;
        assert!(config.general.cache_templates);
        assert_eq!(config.general.anchor_columns_threshold, 10);
        assert_eq!(config.path(), Some(path.as_path()));

        Ok(())
    }

    #[test]
    fn test_defaults_for_missing_keys() -> Result<(), Error> {
        let dir = TempDir::new("xview-config")?;
        let path = dir.path().join("xview.toml");
        std::fs::write(&path, "")?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.general.anchor_columns_threshold, 4);
        assert_eq!(
            config.general.cache_templates,
            GeneralConfig::default_cache_templates()
        );

        Ok(())
    }

    #[test]
    fn test_invalid_config() -> Result<(), Error> {
        let dir = TempDir::new("xview-config")?;
        let path = dir.path().join("xview.toml");
        std::fs::write(&path, "[general]\nanchor_columns_threshold = \"four\"\n")?;

        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));

        Ok(())
    }
}
