//! Application configuration module.
//!
//! Handles loading configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_ALIAS_LENGTH, DEFAULT_SESSION_TTL_SECS, MAX_ALIAS_GENERATION_ATTEMPTS};

/// Which store backend holds users and aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Process-local maps; contents are lost on restart
    Memory,
    /// SQLite database at `Config::database_url`
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageKind::Memory),
            "sqlite" => Ok(StorageKind::Sqlite),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL for building shortened links
    pub base_url: String,
    /// Store backend
    pub storage: StorageKind,
    /// SQLite database path, used when `storage` is `Sqlite`
    pub database_url: String,
    /// Length of generated aliases
    pub alias_length: usize,
    /// Attempts at finding a free generated alias before failing
    pub max_alias_attempts: u32,
    /// Session lifetime in seconds
    pub session_ttl_secs: u64,
    /// Maximum number of concurrent sessions kept
    pub session_max_capacity: u64,
    /// Redirect cache TTL in seconds
    pub alias_cache_ttl_secs: u64,
    /// Redirect cache maximum capacity
    pub alias_cache_max_capacity: u64,
    /// Enable Prometheus metrics endpoint
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `HOST`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `BASE_URL`: Base URL for short links (default: "http://{HOST}:{PORT}")
    /// - `STORAGE`: "memory" or "sqlite" (default: "memory")
    /// - `DATABASE_URL`: Path to SQLite database (default: "aliases.db")
    /// - `ALIAS_LENGTH`: Length of generated aliases (default: 8)
    /// - `MAX_ALIAS_ATTEMPTS`: Generation retry bound (default: 10)
    /// - `SESSION_TTL_SECS`: Session lifetime (default: 3600)
    /// - `SESSION_MAX_CAPACITY`: Session cache capacity (default: 10000)
    /// - `ALIAS_CACHE_TTL_SECS`: Redirect cache TTL (default: 300)
    /// - `ALIAS_CACHE_MAX_CAPACITY`: Redirect cache capacity (default: 10000)
    /// - `METRICS_ENABLED`: Enable Prometheus metrics endpoint (default: true)
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port: u16 = parse_var("PORT", defaults.port)?;
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        Ok(Self {
            host,
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
            storage: parse_var("STORAGE", defaults.storage)?,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            alias_length: parse_var("ALIAS_LENGTH", defaults.alias_length)?,
            max_alias_attempts: parse_var("MAX_ALIAS_ATTEMPTS", defaults.max_alias_attempts)?,
            session_ttl_secs: parse_var("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            session_max_capacity: parse_var("SESSION_MAX_CAPACITY", defaults.session_max_capacity)?,
            alias_cache_ttl_secs: parse_var("ALIAS_CACHE_TTL_SECS", defaults.alias_cache_ttl_secs)?,
            alias_cache_max_capacity: parse_var(
                "ALIAS_CACHE_MAX_CAPACITY",
                defaults.alias_cache_max_capacity,
            )?,
            metrics_enabled: parse_var("METRICS_ENABLED", defaults.metrics_enabled)?,
        })
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_var<T>(name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{} must be valid: {}", name, e)),
        Err(_) => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            storage: StorageKind::Memory,
            database_url: "aliases.db".to_string(),
            alias_length: DEFAULT_ALIAS_LENGTH,
            max_alias_attempts: MAX_ALIAS_GENERATION_ATTEMPTS,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            session_max_capacity: 10_000,
            alias_cache_ttl_secs: 300,
            alias_cache_max_capacity: 10_000,
            metrics_enabled: true,
        }
    }
}
