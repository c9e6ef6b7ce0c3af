//! Configuration handling.
//!
//! Configuration is stored in `.carequeue/config.yaml` (or under the directory
//! named by `CAREQUEUE_HOME`) and includes:
//! - The EMR server base URL and the single-page-app base path
//! - Credentials for the REST API

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CareQueueError, Result};
use crate::navigation::BasePaths;

/// Default configuration directory, relative to the working directory
pub const CONFIG_DIR: &str = ".carequeue";

/// Overrides the configuration directory
pub const HOME_ENV: &str = "CAREQUEUE_HOME";
pub const USERNAME_ENV: &str = "CAREQUEUE_USERNAME";
pub const PASSWORD_ENV: &str = "CAREQUEUE_PASSWORD";

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "server.base_url",
    "server.spa_base",
    "auth.username",
    "auth.password",
];

const DEFAULT_BASE_URL: &str = "http://localhost:8080/openmrs";
const DEFAULT_SPA_BASE: &str = "/openmrs/spa";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server root, e.g. `https://emr.example.org/openmrs`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path the single-page app is served from
    #[serde(default = "default_spa_base")]
    pub spa_base: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            spa_base: default_spa_base(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_spa_base() -> String {
    DEFAULT_SPA_BASE.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Basic-auth credentials for the REST API
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        let dir = env::var_os(HOME_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR));
        dir.join("config.yaml")
    }

    /// Load configuration from the default path, or return defaults if there is no file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if !self.server.spa_base.starts_with('/') {
            return Err(CareQueueError::Config(format!(
                "server.spa_base must be an absolute path, got '{}'",
                self.server.spa_base
            )));
        }
        Ok(())
    }

    /// Parsed server base URL; only http and https are accepted
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.server.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CareQueueError::Config(format!(
                "unsupported scheme '{other}' in server.base_url"
            ))),
        }
    }

    /// Base paths used to resolve navigation placeholders
    pub fn base_paths(&self) -> Result<BasePaths> {
        Ok(BasePaths {
            base: self.base_url()?.path().to_string(),
            spa_base: self.server.spa_base.clone(),
        })
    }

    /// Credentials from the environment, falling back to the config file.
    ///
    /// Both a username and a password are required.
    pub fn credentials(&self) -> Option<Credentials> {
        let username = env_value(USERNAME_ENV).or_else(|| self.auth.username.clone())?;
        let password = env_value(PASSWORD_ENV).or_else(|| self.auth.password.clone())?;
        Some(Credentials {
            username,
            password: SecretString::from(password),
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "server.base_url" => Ok(Some(self.server.base_url.clone())),
            "server.spa_base" => Ok(Some(self.server.spa_base.clone())),
            "auth.username" => Ok(self.auth.username.clone()),
            "auth.password" => Ok(self.auth.password.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a value by dotted key. The result is validated before it is kept.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "server.base_url" => updated.server.base_url = value.to_string(),
            "server.spa_base" => updated.server.spa_base = value.to_string(),
            "auth.username" => updated.auth.username = Some(value.to_string()),
            "auth.password" => updated.auth.password = Some(value.to_string()),
            _ => return Err(unknown_key(key)),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

/// Whether a config key holds a secret that should be masked on display
pub fn is_sensitive_key(key: &str) -> bool {
    key == "auth.password"
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn unknown_key(key: &str) -> CareQueueError {
    CareQueueError::Config(format!(
        "unknown config key '{key}', expected one of: {}",
        CONFIG_KEYS.join(", ")
    ))
}
