//! Configuration file support
//!
//! Values are resolved in this order, first match wins:
//! command-line flag, environment variable, `roster.toml`, built-in default.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//! cors_permissive = false
//!
//! [database]
//! path = "/var/lib/roster/roster.db"
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use roster_server::ServerConfig;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

/// Database file used when nothing else is configured
pub const DEFAULT_DATABASE: &str = "roster.db";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub cors_permissive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub path: Option<PathBuf>,
}

impl RosterConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `roster.toml` in the
    /// working directory is used if present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config not found at {:?}", path);
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config = Self::parse(&content)
            .context(format!("Failed to parse config file {:?} (invalid TOML)", path))?;

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Database path: flag/env value, then config file, then default.
    pub fn database_path(&self, override_path: Option<PathBuf>) -> PathBuf {
        override_path
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    /// Server settings with flag/env overrides applied on top.
    pub fn server_config(&self, bind: Option<SocketAddr>, cors_permissive: bool) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            bind_addr: bind.or(self.server.bind).unwrap_or(defaults.bind_addr),
            cors_permissive: cors_permissive
                || self.server.cors_permissive.unwrap_or(defaults.cors_permissive),
        }
    }
}
