//! Store connector
//!
//! Opens the connection pool at startup, retrying per [`RetryPolicy`].

use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::{AnyConnection, AnyPool, Connection};

use super::{RetryPolicy, StoreConfig};
use crate::{Error, Result};

/// Open a bounded pool to the configured store.
///
/// Each attempt opens exactly one connection and closes it again, so the
/// policy alone decides how often and how fast the store is tried. Once a
/// connection succeeds the pool is built lazily on the same URL. Exhausting
/// the policy returns [`Error::Connection`]; callers at startup treat it as
/// fatal.
pub async fn connect_with_retry(config: &StoreConfig, policy: &RetryPolicy) -> Result<AnyPool> {
    install_default_drivers();

    // Fail fast on a URL we could never connect to.
    config.dialect()?;

    let url = config.connection_url();
    let url = url.as_str();
    tracing::info!("Connecting to store at {}", config.describe());

    policy
        .run(|attempt| async move {
            tracing::debug!("Store connection attempt {}", attempt);
            let conn = AnyConnection::connect(url).await?;
            conn.close().await
        })
        .await
        .map_err(|source| {
            tracing::error!(
                "Failed to connect to store after {} attempts",
                policy.attempts()
            );
            Error::Connection {
                attempts: policy.attempts(),
                source,
            }
        })?;

    let pool = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy(url)?;

    tracing::info!("Connected to store at {}", config.describe());
    Ok(pool)
}
