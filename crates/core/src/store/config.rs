//! Store connection settings

use std::fmt;
use std::time::Duration;

use crate::{Error, Result};

/// SQL flavour behind a connection URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(Error::InvalidInput(format!(
                "Unsupported database scheme: {scheme}"
            ))),
        }
    }
}

/// Where the store lives and how the pool talks to it.
#[derive(Clone)]
pub struct StoreConfig {
    /// Full URL; takes precedence over the individual parts below
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub operation_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "mysql".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: "defaultpassword".to_string(),
            database: "todo_db".to_string(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            operation_timeout: Duration::from_secs(10),
        }
    }
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url.as_ref().map(|_| "<set>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("operation_timeout", &self.operation_timeout)
            .finish_non_exhaustive()
    }
}

impl StoreConfig {
    /// Settings pointing at an explicit URL, other fields defaulted
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; used by `from_env` and tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let password = lookup("MYSQL_PASSWORD")
            .or_else(|| lookup("MYSQL_ROOT_PASSWORD"))
            .unwrap_or(defaults.password);

        Self {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: lookup("MYSQL_HOST").unwrap_or(defaults.host),
            port: parse_or(lookup("MYSQL_PORT"), defaults.port),
            user: lookup("MYSQL_USER").unwrap_or(defaults.user),
            password,
            database: lookup("MYSQL_DATABASE").unwrap_or(defaults.database),
            max_connections: parse_or(lookup("DB_POOL_SIZE"), defaults.max_connections).max(1),
            acquire_timeout: timeout_or(
                lookup("DB_ACQUIRE_TIMEOUT_SECS"),
                defaults.acquire_timeout,
            ),
            operation_timeout: timeout_or(
                lookup("DB_OPERATION_TIMEOUT_SECS"),
                defaults.operation_timeout,
            ),
        }
    }

    /// Connection URL handed to the driver
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "mysql://{}:{}@{}:{}/{}",
                urlencoding::encode(&self.user),
                urlencoding::encode(&self.password),
                self.host,
                self.port,
                self.database
            ),
        }
    }

    pub fn dialect(&self) -> Result<Dialect> {
        Dialect::from_url(&self.connection_url())
    }

    /// Short description safe to log
    pub fn describe(&self) -> String {
        match &self.url {
            Some(url) => match url.split_once('@') {
                Some((_, rest)) => format!("{}://{}", url.split(':').next().unwrap_or(""), rest),
                None => url.clone(),
            },
            None => format!("{}:{}/{}", self.host, self.port, self.database),
        }
    }
}

pub(crate) fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn secs_or(raw: Option<String>, default: Duration) -> Duration {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// Like [`secs_or`], but a zero timeout also falls back to the default.
pub(crate) fn timeout_or(raw: Option<String>, default: Duration) -> Duration {
    Some(secs_or(raw, default))
        .filter(|timeout| !timeout.is_zero())
        .unwrap_or(default)
}
