//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram bot token (`TELEGRAM_BOT_TOKEN`)
    pub telegram_bot_token: SecretString,

    /// Leaderboard API configuration
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,

    /// Single-instance lock configuration
    #[serde(default)]
    pub lock: LockConfig,

    /// Keep-alive HTTP listener configuration
    #[serde(default)]
    pub keep_alive: KeepAliveConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardConfig {
    /// API origin
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Only rows with exactly this `date` are shown
    #[serde(default = "default_reference_date")]
    pub reference_date: String,

    /// Request timeout; the HTTP client default applies when unset
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockConfig {
    #[serde(default = "default_lock_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeepAliveConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Fallback filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            reference_date: default_reference_date(),
            timeout: None,
        }
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            path: default_lock_path(),
        }
    }
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    pixelpals_client::DEFAULT_BASE_URL.into()
}

fn default_reference_date() -> String {
    "2024-04-29".into()
}

fn default_lock_path() -> PathBuf {
    PathBuf::from("bot.lock")
}

fn default_true() -> bool {
    true
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(config::Environment::default())
    }

    fn from_environment(environment: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(
                environment
                    .separator("__")
                    // Keep strings as strings; wallet-like or numeric-looking
                    // values must not be reinterpreted.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration (is TELEGRAM_BOT_TOKEN set?)")
    }

    /// Socket address string for the keep-alive listener.
    pub fn keep_alive_addr(&self) -> String {
        format!("{}:{}", self.keep_alive.listen_addr, self.keep_alive.port)
    }
}
