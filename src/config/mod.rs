use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::MAX_TTL;

/// bcrypt 接受的代价范围
pub const HASH_COST_RANGE: RangeInclusive<u32> = 4..=31;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: Option<String>,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub session_cookie_name: String,
    pub session_ttl_secs: u64,
    pub cache_timeout_secs: u64,
    pub expensive_query_delay_ms: u64,
    pub password_hash_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://school.db".into(),
            database_max_connections: 5,
            redis_url: None,
            server_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            server_port: 5000,
            session_cookie_name: "session_id".into(),
            session_ttl_secs: 24 * 3600,
            cache_timeout_secs: 60,
            expensive_query_delay_ms: 2000,
            password_hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构建配置，未设置的键使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let redis_url = lookup("REDIS_URL").filter(|url| !url.trim().is_empty());

        Ok(Config {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            redis_url,
            server_host: parse_or(&lookup, "SERVER_HOST", defaults.server_host)?,
            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port)?,
            session_cookie_name: lookup("SESSION_COOKIE_NAME")
                .unwrap_or(defaults.session_cookie_name),
            session_ttl_secs: in_range(
                "SESSION_TTL",
                parse_secs(&lookup, "SESSION_TTL", defaults.session_ttl_secs)?,
                1..=MAX_TTL.as_secs(),
            )?,
            cache_timeout_secs: in_range(
                "CACHE_TIMEOUT",
                parse_secs(&lookup, "CACHE_TIMEOUT", defaults.cache_timeout_secs)?,
                1..=MAX_TTL.as_secs(),
            )?,
            expensive_query_delay_ms: parse_or(
                &lookup,
                "EXPENSIVE_QUERY_DELAY_MS",
                defaults.expensive_query_delay_ms,
            )?,
            password_hash_cost: in_range(
                "PASSWORD_HASH_COST",
                parse_or(&lookup, "PASSWORD_HASH_COST", defaults.password_hash_cost)?,
                HASH_COST_RANGE,
            )?,
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_timeout_secs)
    }

    pub fn expensive_query_delay(&self) -> Duration {
        Duration::from_millis(self.expensive_query_delay_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

// 秒数允许带 "s" 后缀，例如 "60s"
fn parse_secs<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .trim_end_matches('s')
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

fn in_range<T>(key: &'static str, value: T, range: RangeInclusive<T>) -> Result<T, ConfigError>
where
    T: PartialOrd + Copy + Into<u64>,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            key,
            value: value.into(),
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        })
    }
}
