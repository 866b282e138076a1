//! Process settings from the environment (`.env` is loaded by the binary via dotenvy).

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/rest_scaffold";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3030";
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Connection pool bounds. A `None` duration disables that limit.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        PoolSettings {
            max_connections: 10,
            min_connections: 0,
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(180)),
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub pool: PoolSettings,
    pub body_limit: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", defaults.min_connections)?,
            idle_timeout: optional_secs(&lookup, "DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout)?,
            max_lifetime: optional_secs(&lookup, "DB_MAX_LIFETIME_SECS", defaults.max_lifetime)?,
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )?),
        };
        if pool.max_connections == 0 || pool.min_connections > pool.max_connections {
            return Err(ConfigError::InvalidSetting {
                key: "DB_MIN_CONNECTIONS",
                value: format!("{} (max {})", pool.min_connections, pool.max_connections),
            });
        }
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            pool,
            body_limit: parse_or(&lookup, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidSetting { key, value: raw }),
    }
}

/// Seconds; `0` means no limit.
fn optional_secs<F>(
    lookup: &F,
    key: &'static str,
    default: Option<Duration>,
) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse_or(lookup, key, default.map(|d| d.as_secs()).unwrap_or(0))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}
