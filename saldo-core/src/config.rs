//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "apiUrl": "https://api.example.com",
//!   "locale": "pt-BR",
//!   "authScheme": "Bearer",
//!   "timeoutSecs": 30
//! }
//! ```
//! Fields this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::http::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use crate::i18n::Locale;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "SALDO_API_URL";

/// Environment variable overriding the locale
pub const LOCALE_ENV: &str = "SALDO_LOCALE";

/// API base URL baked in at build time, if any
const BUILD_API_URL: Option<&str> = option_env!("SALDO_API_URL");

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl SettingsFile {
    fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable {}: {}", path.display(), e);
            Self::default()
        }))
    }
}

/// Saldo configuration (resolved view of settings and environment)
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the banking API, if one could be resolved
    pub api_url: Option<String>,
    pub locale: Locale,
    /// Prefix for the Authorization header; `None` sends the raw token
    pub auth_scheme: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: BUILD_API_URL.map(str::to_string),
            locale: Locale::default(),
            auth_scheme: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// The API URL resolves from `SALDO_API_URL`, then `settings.json`, then
    /// the build-time value. The locale from `SALDO_LOCALE` wins over the
    /// file.
    pub fn load(saldo_dir: &Path) -> Result<Self> {
        let raw = SettingsFile::read(&saldo_dir.join("settings.json"))?;
        Ok(Self::resolve(
            raw,
            std::env::var(API_URL_ENV).ok(),
            std::env::var(LOCALE_ENV).ok(),
        ))
    }

    /// Config as written in `settings.json`, ignoring environment overrides
    ///
    /// Used when editing the file so that overrides are never persisted.
    pub fn from_file(saldo_dir: &Path) -> Result<Self> {
        let raw = SettingsFile::read(&saldo_dir.join("settings.json"))?;
        Ok(Self::resolve(raw, None, None))
    }

    /// Set the API base URL after checking it is an http(s) URL
    pub fn set_api_url(&mut self, url: &str) -> crate::domain::result::Result<()> {
        ClientConfig::new(url)?;
        self.api_url = Some(url.trim_end_matches('/').to_string());
        Ok(())
    }

    fn resolve(raw: SettingsFile, env_url: Option<String>, env_locale: Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = non_blank(env_url)
            .or_else(|| non_blank(raw.api_url))
            .or(defaults.api_url);

        let locale = non_blank(env_locale)
            .or_else(|| non_blank(raw.locale))
            .map(|code| {
                code.parse().unwrap_or_else(|e| {
                    tracing::warn!("{}; falling back to {}", e, Locale::default());
                    Locale::default()
                })
            })
            .unwrap_or_default();

        Self {
            api_url,
            locale,
            auth_scheme: non_blank(raw.auth_scheme),
            timeout_secs: raw.timeout_secs.filter(|t| *t > 0).unwrap_or(defaults.timeout_secs),
        }
    }

    /// Resolved API URL, or an error explaining how to set one
    pub fn require_api_url(&self) -> crate::domain::result::Result<&str> {
        self.api_url.as_deref().ok_or_else(|| {
            crate::Error::config(format!(
                "No API URL configured. Set {} or \"apiUrl\" in settings.json",
                API_URL_ENV
            ))
        })
    }

    /// Save config to the data directory
    /// Preserves other settings that the CLI doesn't manage
    pub fn save(&self, saldo_dir: &Path) -> Result<()> {
        let settings_path = saldo_dir.join("settings.json");
        let mut settings = SettingsFile::read(&settings_path)?;

        settings.api_url = self.api_url.clone();
        settings.locale = Some(self.locale.code().to_string());
        settings.auth_scheme = self.auth_scheme.clone();
        settings.timeout_secs = Some(self.timeout_secs);

        std::fs::create_dir_all(saldo_dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
