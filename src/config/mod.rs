//! Configuration module for catalogr
//!
//! Manages the catalog API address, display settings and browse defaults.
//! Configuration is stored in the user's config directory and can be
//! overridden with `CATALOGR_*` environment variables.

mod setup;

pub use setup::first_time_setup;

use crate::query::{DEFAULT_PAGE_SIZE, DecodeOptions, clamp_page_size};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default catalog API address
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default display title
pub const DEFAULT_TITLE: &str = "Software Catalog";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogrConfig {
    /// Base URL of the catalog API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Title shown in the browser header
    #[serde(default = "default_title")]
    pub title: String,

    /// Public origin used to render shareable links
    #[serde(default)]
    pub web_url: Option<String>,

    /// Page size used when a link does not specify one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Start `browse` from the last viewed query
    #[serde(default = "default_true")]
    pub resume_last_query: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_true() -> bool {
    true
}

impl Default for CatalogrConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            title: default_title(),
            web_url: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            quiet: false,
            resume_last_query: true,
        }
    }
}

impl CatalogrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("catalogr").join("config.toml"))
    }

    /// Load configuration from the default path, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating a default file if it doesn't exist
    ///
    /// Environment variables prefixed with `CATALOGR_` override file values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("CATALOGR").try_parsing(true))
            .build()?;

        let mut config: Self = settings.try_deserialize()?;
        config.default_page_size = clamp_page_size(config.default_page_size);
        Ok(config)
    }

    /// Save configuration to the default path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    /// Decode fallbacks derived from this configuration
    #[must_use]
    pub const fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::with_page_size(self.default_page_size)
    }

    /// Shareable link origin, ignoring blank values
    #[must_use]
    pub fn web_url(&self) -> Option<&str> {
        self.web_url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}
