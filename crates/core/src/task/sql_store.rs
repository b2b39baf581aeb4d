//! SQL-backed task storage implementation
//!
//! Every operation is a single statement on a pooled connection. Existence
//! of a row is decided from the affected-row count alone; no read precedes
//! a write.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::AnyPool;

use super::model::{validate_task_text, Task, TaskPatch, DEFAULT_STATUS};
use super::repository::TaskRepository;
use crate::store::{connect_with_retry, Dialect, RetryPolicy, StoreConfig};
use crate::{Error, Result};

const MYSQL_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        task VARCHAR(255) NOT NULL,
        status VARCHAR(64) NOT NULL DEFAULT 'incomplete'
    )
"#;

const SQLITE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        task TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'incomplete'
    )
"#;

/// Task store over a bounded connection pool
pub struct SqlTaskStore {
    pool: AnyPool,
    dialect: Dialect,
    /// Upper bound on a single statement, pool checkout included
    operation_timeout: Duration,
}

impl SqlTaskStore {
    pub fn new(pool: AnyPool, dialect: Dialect, operation_timeout: Duration) -> Self {
        Self {
            pool,
            dialect,
            operation_timeout,
        }
    }

    /// Open the pool with retries and wrap it in a store.
    pub async fn connect(config: &StoreConfig, policy: &RetryPolicy) -> Result<Self> {
        let dialect = config.dialect()?;
        let pool = connect_with_retry(config, policy).await?;
        Ok(Self::new(pool, dialect, config.operation_timeout))
    }

    /// Create the `tasks` table when it is missing.
    pub async fn ensure_schema(&self) -> Result<()> {
        let ddl = match self.dialect {
            Dialect::MySql => MYSQL_SCHEMA,
            Dialect::Sqlite => SQLITE_SCHEMA,
        };
        self.bounded(sqlx::query(ddl).execute(&self.pool)).await?;
        tracing::debug!("Schema ready ({:?})", self.dialect);
        Ok(())
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(Error::Timeout(self.operation_timeout)),
        }
    }
}

#[async_trait]
impl TaskRepository for SqlTaskStore {
    async fn list(&self) -> Result<Vec<Task>> {
        self.bounded(
            sqlx::query_as::<_, Task>("SELECT id, task, status FROM tasks").fetch_all(&self.pool),
        )
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Task>> {
        self.bounded(
            sqlx::query_as::<_, Task>("SELECT id, task, status FROM tasks WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn create(&self, task: &str) -> Result<Task> {
        validate_task_text(task)?;

        let id = match self.dialect {
            Dialect::Sqlite => {
                self.bounded(
                    sqlx::query_scalar::<_, i64>(
                        "INSERT INTO tasks (task, status) VALUES (?, ?) RETURNING id",
                    )
                    .bind(task)
                    .bind(DEFAULT_STATUS)
                    .fetch_one(&self.pool),
                )
                .await?
            }
            Dialect::MySql => {
                let result = self
                    .bounded(
                        sqlx::query("INSERT INTO tasks (task, status) VALUES (?, ?)")
                            .bind(task)
                            .bind(DEFAULT_STATUS)
                            .execute(&self.pool),
                    )
                    .await?;
                // MySQL reports the id in the OK packet of the insert itself.
                result.last_insert_id().ok_or_else(|| {
                    Error::Storage("Store did not report the new task id".to_string())
                })?
            }
        };

        tracing::debug!("Created task {}", id);
        Ok(Task::created(id, task))
    }

    async fn update(&self, id: i64, patch: &TaskPatch) -> Result<()> {
        patch.validate()?;

        let query = match (&patch.task, &patch.status) {
            (Some(task), Some(status)) => {
                sqlx::query("UPDATE tasks SET task = ?, status = ? WHERE id = ?")
                    .bind(task.as_str())
                    .bind(status.as_str())
            }
            (Some(task), None) => {
                sqlx::query("UPDATE tasks SET task = ? WHERE id = ?").bind(task.as_str())
            }
            (None, Some(status)) => {
                sqlx::query("UPDATE tasks SET status = ? WHERE id = ?").bind(status.as_str())
            }
            (None, None) => {
                return Err(Error::InvalidInput("Nothing to update".to_string()));
            }
        };

        let result = self.bounded(query.bind(id).execute(&self.pool)).await?;
        if result.rows_affected() == 0 {
            return Err(Error::TaskNotFound(id));
        }

        tracing::debug!("Updated task {}", id);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM tasks WHERE id = ?")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::TaskNotFound(id));
        }

        tracing::debug!("Deleted task {}", id);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.bounded(sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }
}
