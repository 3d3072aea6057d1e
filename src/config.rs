//! Server configuration from environment variables

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://game_data.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where match results are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: invalid value {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
    pub database_url: String,
    pub max_connections: u32,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `GAMESTATS_BIND_ADDR` (default: 0.0.0.0:5000)
    /// - `GAMESTATS_STORAGE` - `sqlite` or `memory` (default: sqlite)
    /// - `DATABASE_URL` (default: sqlite://game_data.db)
    /// - `GAMESTATS_DB_MAX_CONNECTIONS` (default: 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "GAMESTATS_BIND_ADDR", DEFAULT_BIND_ADDR)?;

        let storage = match lookup("GAMESTATS_STORAGE") {
            Some(value) => {
                StorageBackend::from_str(&value).map_err(|_| ConfigError::Invalid {
                    key: "GAMESTATS_STORAGE",
                    reason: format!(
                        "expected one of {}",
                        StorageBackend::iter()
                            .map(|backend| backend.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                    value,
                })?
            }
            None => StorageBackend::Sqlite,
        };

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections: u32 = parse_or(
            &lookup,
            "GAMESTATS_DB_MAX_CONNECTIONS",
            &DEFAULT_MAX_CONNECTIONS.to_string(),
        )?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "GAMESTATS_DB_MAX_CONNECTIONS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            storage,
            database_url,
            max_connections,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
