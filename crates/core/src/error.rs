//! Error types for the core library

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to connect to the store after {attempts} attempt(s): {source}")]
    Connection {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// The store could not be reached in time; worth retrying later.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Error::Timeout(_) | Error::Database(sqlx::Error::PoolTimedOut)
        )
    }
}
