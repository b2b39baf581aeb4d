//! Process configuration, read once from the environment at startup

use std::time::Duration;

use todo_core::store::{RetryPolicy, StoreConfig};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub request_timeout: Duration,
    pub store: StoreConfig,
    pub retry: RetryPolicy,
}

fn env_number<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or(default),
        None => default,
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: env_number(lookup("PORT"), 3000),
            request_timeout: Duration::from_secs(
                Some(env_number(lookup("REQUEST_TIMEOUT_SECS"), 30))
                    .filter(|&secs| secs > 0)
                    .unwrap_or(30),
            ),
            store: StoreConfig::from_lookup(&lookup),
            retry: RetryPolicy::from_lookup(&lookup),
        }
    }
}
