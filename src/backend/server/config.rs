/**
 * Server Configuration
 *
 * This module loads the server configuration and opens the SQLite
 * connection pool.
 *
 * # Configuration Sources
 *
 * In increasing order of precedence:
 * 1. Built-in defaults suitable for local development
 * 2. An optional TOML file named by `FANPUB_CONFIG`
 * 3. Environment variables (a `.env` file is loaded first if present)
 *
 * # Error Handling
 *
 * Unlike the database pool, which is required, nothing here is optional at
 * runtime: a malformed value is a `ConfigError` and stops startup.
 */

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::backend::auth::password::{MAX_COST, MIN_COST};

/// Environment variable naming an optional TOML configuration file
pub const CONFIG_PATH_VAR: &str = "FANPUB_CONFIG";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://fanpub.db?mode=rwc";
const DEFAULT_PURGE_INTERVAL_SECS: u64 = 300;
const MAX_POOL_CONNECTIONS: u32 = 5;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Where session records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process memory; sessions end with the process
    #[default]
    Memory,
    /// The `sessions` table; sessions survive restarts
    Sql,
}

impl FromStr for SessionBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sql" | "sqlite" => Ok(Self::Sql),
            _ => Err(()),
        }
    }
}

/// Contents of the optional TOML file; every key may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub session_backend: Option<SessionBackend>,
    pub session_ttl_secs: Option<u64>,
    pub bcrypt_cost: Option<u32>,
    pub cookie_secure: Option<bool>,
    pub purge_interval_secs: Option<u64>,
}

impl FileConfig {
    /// Parse the file at `path`
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub session_backend: SessionBackend,
    /// Session lifetime; `None` keeps sessions until logout
    pub session_ttl: Option<Duration>,
    pub bcrypt_cost: u32,
    pub cookie_secure: bool,
    /// How often expired sessions are purged (only when a TTL is set)
    pub purge_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            session_backend: SessionBackend::Memory,
            session_ttl: None,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cookie_secure: false,
            purge_interval: Duration::from_secs(DEFAULT_PURGE_INTERVAL_SECS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, the optional TOML file and the
    /// process environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let file = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                tracing::info!("Reading configuration from {}", path);
                Some(FileConfig::from_path(Path::new(&path))?)
            }
            Err(_) => None,
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from a parsed file and an environment lookup
    pub fn from_sources<F>(file: Option<FileConfig>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let port = parse_env(&env, "SERVER_PORT")?
            .or(file.port)
            .unwrap_or(defaults.port);

        let database_url = env("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .or(file.database_url)
            .unwrap_or(defaults.database_url);

        let session_backend = match env("SESSION_BACKEND") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SESSION_BACKEND",
                value,
            })?,
            None => file.session_backend.unwrap_or(defaults.session_backend),
        };

        let session_ttl = parse_env::<u64, _>(&env, "SESSION_TTL_SECS")?
            .or(file.session_ttl_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let bcrypt_cost = parse_env(&env, "BCRYPT_COST")?
            .or(file.bcrypt_cost)
            .unwrap_or(defaults.bcrypt_cost);
        if !(MIN_COST..=MAX_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let cookie_secure = parse_env(&env, "COOKIE_SECURE")?
            .or(file.cookie_secure)
            .unwrap_or(defaults.cookie_secure);

        let purge_interval = parse_env::<u64, _>(&env, "SESSION_PURGE_INTERVAL_SECS")?
            .or(file.purge_interval_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.purge_interval);

        Ok(Self {
            port,
            database_url,
            session_backend,
            session_ttl,
            bcrypt_cost,
            cookie_secure,
            purge_interval,
        })
    }
}

fn parse_env<T, F>(env: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match env(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None),
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Open the SQLite pool for `database_url`
///
/// An in-memory database exists per connection, so it gets a single
/// connection that is never recycled.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if is_memory_url(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(MAX_POOL_CONNECTIONS)
            .connect_with(options)
            .await?
    };

    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

/// Connect and migrate in one step, as the server does at startup
pub async fn load_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = connect_database(database_url).await?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
