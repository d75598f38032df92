// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Correlator configuration.
//!
//! Supports both a TOML file and CLI overrides; CLI flags win when both
//! are given.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelatorConfig {
    /// How long a Begin waits in `Sessions` for its terminator.
    #[serde(default = "default_expire_session_secs")]
    pub expire_session_secs: u64,

    /// How long a terminator waits in `EarlyPending` for its Begin.
    #[serde(default = "default_expire_pending_secs")]
    pub expire_pending_secs: u64,

    /// How long a closed dialogue is remembered in `Old`.
    #[serde(default = "default_expire_ended_secs")]
    pub expire_ended_secs: u64,

    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    #[serde(default)]
    pub statsd_prefix: String,

    /// Divisor applied to a raw nanosecond latency before reporting.
    /// `1` (the default) reports raw nanoseconds.
    #[serde(default = "default_scale")]
    pub scale: u64,
}

fn default_expire_session_secs() -> u64 {
    10
}

fn default_expire_pending_secs() -> u64 {
    2
}

fn default_expire_ended_secs() -> u64 {
    10
}

fn default_listen_address() -> String {
    "127.0.0.1:6666".to_string()
}

fn default_scale() -> u64 {
    1
}

impl Default for CorrelatorConfig {
    fn default() -> Self {
        Self {
            expire_session_secs: default_expire_session_secs(),
            expire_pending_secs: default_expire_pending_secs(),
            expire_ended_secs: default_expire_ended_secs(),
            listen_address: default_listen_address(),
            statsd_prefix: String::new(),
            scale: default_scale(),
        }
    }
}

impl CorrelatorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale == 0 {
            return Err(ConfigError::Invalid("scale must be nonzero".into()));
        }
        Ok(())
    }

    pub fn expire_session(&self) -> Duration {
        Duration::from_secs(self.expire_session_secs)
    }

    pub fn expire_pending(&self) -> Duration {
        Duration::from_secs(self.expire_pending_secs)
    }

    pub fn expire_ended(&self) -> Duration {
        Duration::from_secs(self.expire_ended_secs)
    }
}
