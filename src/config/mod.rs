//! # Configuration Management Module
//!
//! Zingle keeps no state on disk, but the capacity constants, credential
//! handling, console pacing and logging destinations are all configurable
//! through a small TOML file.
//!
//! ## Configuration Structure
//!
//! - [`LimitsConfig`] - Capacity ceilings and byte limits enforced by the store
//! - [`GroupsConfig`] - Group membership policy
//! - [`SecurityConfig`] - Credential storage (plaintext or Argon2id)
//! - [`ConsoleConfig`] - Pacing and screen handling for the interactive menu
//! - [`LoggingConfig`] - Log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zingle::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Max groups: {}", config.limits.max_groups);
//!
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [limits]
//! max_accounts = 100
//! max_groups = 10
//! max_message_bytes = 255
//! max_identifier_bytes = 49
//!
//! [groups]
//! require_registered_members = false
//!
//! [security]
//! hash_passwords = false
//!
//! [console]
//! pause_ms = 0
//! clear_screen = false
//! banner = true
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every section is optional; missing sections fall back to [`Config::default`].

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Default ceiling on registered accounts.
pub const DEFAULT_MAX_ACCOUNTS: usize = 100;
/// Default ceiling on concurrently existing groups.
pub const DEFAULT_MAX_GROUPS: usize = 10;
/// Default maximum message body size (bytes, before obfuscation).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 255;
/// Default maximum size for usernames, passwords and group names (bytes).
pub const DEFAULT_MAX_IDENTIFIER_BYTES: usize = 49;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub groups: GroupsConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Capacity constants enforced by [`crate::social::SocialStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_accounts")]
    pub max_accounts: usize,
    #[serde(default = "default_max_groups")]
    pub max_groups: usize,
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
    #[serde(default = "default_max_identifier_bytes")]
    pub max_identifier_bytes: usize,
}

fn default_max_accounts() -> usize {
    DEFAULT_MAX_ACCOUNTS
}

fn default_max_groups() -> usize {
    DEFAULT_MAX_GROUPS
}

fn default_max_message_bytes() -> usize {
    DEFAULT_MAX_MESSAGE_BYTES
}

fn default_max_identifier_bytes() -> usize {
    DEFAULT_MAX_IDENTIFIER_BYTES
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_accounts: DEFAULT_MAX_ACCOUNTS,
            max_groups: DEFAULT_MAX_GROUPS,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            max_identifier_bytes: DEFAULT_MAX_IDENTIFIER_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupsConfig {
    /// Reject `join` requests naming a username that has no account.
    /// Defaults to false: any identifier may be added to a group.
    #[serde(default)]
    pub require_registered_members: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Argon2Config {
    #[serde(default)]
    pub memory_kib: Option<u32>,
    #[serde(default)]
    pub time_cost: Option<u32>,
    #[serde(default)]
    pub parallelism: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecurityConfig {
    /// Store Argon2id hashes instead of verbatim passwords. Authentication
    /// answers the same yes/no question either way.
    #[serde(default)]
    pub hash_passwords: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argon2: Option<Argon2Config>,
}

impl SecurityConfig {
    /// Build Argon2 parameters from the optional overrides; `None` means library defaults.
    pub fn argon2_params(&self) -> Result<Option<argon2::Params>> {
        let Some(cfg) = &self.argon2 else {
            return Ok(None);
        };
        let params = argon2::Params::new(
            cfg.memory_kib.unwrap_or(argon2::Params::DEFAULT_M_COST),
            cfg.time_cost.unwrap_or(argon2::Params::DEFAULT_T_COST),
            cfg.parallelism.unwrap_or(argon2::Params::DEFAULT_P_COST),
            None,
        )
        .map_err(|e| anyhow!("Invalid argon2 parameters: {}", e))?;
        Ok(Some(params))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Pause after each rendered result (ms). The classic terminal build paused 3000ms.
    #[serde(default)]
    pub pause_ms: u64,
    /// Clear the terminal after each result.
    #[serde(default)]
    pub clear_screen: bool,
    /// Show the welcome banner on the logged-out menu.
    #[serde(default = "default_banner")]
    pub banner: bool,
}

fn default_banner() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            pause_ms: 0,
            clear_screen: false,
            banner: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level; unknown values fall back to `Warn`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject limits that would make the store unusable.
    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;
        if limits.max_accounts == 0 {
            return Err(anyhow!("limits.max_accounts must be at least 1"));
        }
        if limits.max_identifier_bytes == 0 {
            return Err(anyhow!("limits.max_identifier_bytes must be at least 1"));
        }
        if limits.max_message_bytes == 0 {
            return Err(anyhow!("limits.max_message_bytes must be at least 1"));
        }
        self.security.argon2_params()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_default_match_classic_constants() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.max_accounts, 100);
        assert_eq!(limits.max_groups, 10);
        assert_eq!(limits.max_message_bytes, 255);
        assert_eq!(limits.max_identifier_bytes, 49);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[limits]\nmax_groups = 3\n").unwrap();
        assert_eq!(config.limits.max_groups, 3);
        assert_eq!(config.limits.max_accounts, 100);
        assert!(!config.security.hash_passwords);
        assert!(config.console.banner);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.limits, LimitsConfig::default());
        assert!(!config.groups.require_registered_members);
    }

    #[test]
    fn test_zero_accounts_rejected() {
        let mut config = Config::default();
        config.limits.max_accounts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_level_filter_fallback() {
        let logging = LoggingConfig {
            level: "debug".into(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
        let bogus = LoggingConfig {
            level: "chatty".into(),
            file: None,
        };
        assert_eq!(bogus.level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_argon2_params_override() {
        let security = SecurityConfig {
            hash_passwords: true,
            argon2: Some(Argon2Config {
                memory_kib: Some(8),
                time_cost: Some(1),
                parallelism: Some(1),
            }),
        };
        let params = security.argon2_params().unwrap().unwrap();
        assert_eq!(params.m_cost(), 8);
        assert_eq!(params.t_cost(), 1);
        assert!(SecurityConfig::default().argon2_params().unwrap().is_none());
    }

    #[test]
    fn test_config_serde_round_trip_toml() {
        let mut config = Config::default();
        config.console.pause_ms = 3000;
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("pause_ms = 3000"));
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.console.pause_ms, 3000);
    }
}
