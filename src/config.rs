//! Deployment configuration, read once at startup and injected downward.

use crate::util::env as env_util;
use anyhow::{bail, Context, Result};
use std::fmt;

pub const DEFAULT_CHARSET: &str = "utf8mb4";

/// sqlx encodes every bound string as UTF-8, so the session must agree.
pub const SUPPORTED_CHARSETS: &[&str] = &["utf8mb4", "utf8mb3", "utf8"];

/// Environment keys that must be present to talk to storage.
pub const REQUIRED_STORAGE_KEYS: &[&str] = &["DB_DATABASE", "DB_USERNAME"];

/// Keys included in the startup configuration snapshot.
pub const LOGGED_KEYS: &[&str] = &[
    "API_HOST",
    "API_PORT",
    "DB_HOST",
    "DB_PORT",
    "DB_DATABASE",
    "DB_USERNAME",
    "DB_PASSWORD",
    "DB_CHARSET",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let host = env_util::env_opt("API_HOST").unwrap_or(defaults.host);
        let port = env_util::env_parse_opt::<u16>("API_PORT")
            .context("Invalid API_PORT")?
            .unwrap_or(defaults.port);
        Ok(Self { host, port })
    }
}

/// Connection settings for the media database.
#[derive(Clone)]
pub struct StorageConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub charset: String,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self> {
        let host = env_util::env_opt("DB_HOST").unwrap_or_else(|| "localhost".to_string());
        let port = env_util::env_parse_opt::<u16>("DB_PORT")
            .context("Invalid DB_PORT")?
            .unwrap_or(3306);
        let database = env_util::env_req("DB_DATABASE")?;
        let user = env_util::env_req("DB_USERNAME")?;
        // An empty password is a legitimate local setup.
        let password = std::env::var("DB_PASSWORD").unwrap_or_default();
        let charset =
            env_util::env_opt("DB_CHARSET").unwrap_or_else(|| DEFAULT_CHARSET.to_string());

        let cfg = Self {
            host: host.trim().to_string(),
            port,
            database: database.trim().to_string(),
            user: user.trim().to_string(),
            password,
            charset: charset.trim().to_string(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// The charset is spliced into `SET NAMES`, so it must be a bare identifier.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.charset) {
            bail!("DB_CHARSET must be a bare identifier, got {:?}", self.charset);
        }
        if !SUPPORTED_CHARSETS
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&self.charset))
        {
            bail!(
                "DB_CHARSET {:?} is not a UTF-8 character set (expected one of {:?})",
                self.charset,
                SUPPORTED_CHARSETS
            );
        }
        if self.database.is_empty() {
            bail!("DB_DATABASE must not be empty");
        }
        Ok(())
    }
}

// SECURITY: the password never reaches logs through Debug.
impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("charset", &self.charset)
            .finish()
    }
}

pub(crate) fn is_identifier(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
