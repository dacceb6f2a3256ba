//! User configuration for prdesk
//!
//! This module handles user-configurable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Paths;

/// Environment variables checked (in order) for the generative-language API key
const API_KEY_ENV_VARS: [&str; 2] = ["PRDESK_API_KEY", "API_KEY"];

/// Where the dashboard aggregate is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// SQLite key-value table in the config directory
    #[default]
    Local,
    /// Remote JSON document store
    Remote,
}

/// User configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Persistence backend
    #[serde(default)]
    pub storage: StorageKind,

    /// Base URL of the remote document store (e.g. a realtime database root)
    #[serde(default)]
    pub remote_url: String,

    /// Document path under the remote root
    #[serde(default = "default_remote_path")]
    pub remote_path: String,

    /// Auth token appended to remote requests
    #[serde(default)]
    pub remote_auth: String,

    /// Generative-language API key
    #[serde(default)]
    pub ai_api_key: String,

    /// Generative-language API base URL
    #[serde(default = "default_ai_base_url")]
    pub ai_base_url: String,

    /// Model used for pitches and smart import
    #[serde(default = "default_ai_model")]
    pub ai_model: String,

    /// Request timeout for AI calls, in seconds
    #[serde(default = "default_ai_timeout")]
    pub ai_timeout_secs: u64,

    /// Populate an empty store with the bundled sample records
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::Local,
            remote_url: String::new(),
            remote_path: default_remote_path(),
            remote_auth: String::new(),
            ai_api_key: String::new(),
            ai_base_url: default_ai_base_url(),
            ai_model: default_ai_model(),
            ai_timeout_secs: default_ai_timeout(),
            seed_sample_data: true,
        }
    }
}

impl UserConfig {
    /// Load configuration from the settings file in the config directory
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        let mut config = Self::load_from(&paths.settings_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file, writing defaults if it is missing
    pub fn load_from(settings_path: &Path) -> Result<Self> {
        if settings_path.exists() {
            let content =
                std::fs::read_to_string(settings_path).context("Failed to read settings file")?;
            let config: UserConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(settings_path)?;
            Ok(config)
        }
    }

    fn save_to(&self, settings_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(settings_path, content).context("Failed to write settings file")?;
        Ok(())
    }

    /// The API key from the environment wins over the one in settings.json.
    /// It is never written back to disk.
    fn apply_env_overrides(&mut self) {
        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
        {
            self.ai_api_key = key;
        }
    }

    /// Whether the remote backend has enough settings to be used
    pub fn remote_configured(&self) -> bool {
        !self.remote_url.trim().is_empty()
    }
}

// Default value functions for serde

fn default_true() -> bool {
    true
}

fn default_remote_path() -> String {
    "prdesk".to_string()
}

fn default_ai_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_ai_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_ai_timeout() -> u64 {
    60
}
