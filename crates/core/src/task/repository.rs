//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{Task, TaskPatch};
use crate::Result;

/// Repository interface for task CRUD operations
///
/// `update` and `delete` report a missing row as [`crate::Error::TaskNotFound`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get all tasks, in the store's native order
    async fn list(&self) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get(&self, id: i64) -> Result<Option<Task>>;

    /// Insert a new task and return it with its store-assigned ID
    async fn create(&self, task: &str) -> Result<Task>;

    /// Apply a partial update to an existing task
    async fn update(&self, id: i64, patch: &TaskPatch) -> Result<()>;

    /// Permanently remove a task
    async fn delete(&self, id: i64) -> Result<()>;

    /// Check that the store answers
    async fn ping(&self) -> Result<()>;
}
