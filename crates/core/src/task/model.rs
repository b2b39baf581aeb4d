//! Task model definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Error, Result};

/// Status every task starts with.
pub const DEFAULT_STATUS: &str = "incomplete";

/// A todo item as stored in the `tasks` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub task: String,
    pub status: String,
}

impl Task {
    /// Build the row a fresh insert produces for `id`.
    pub fn created(id: i64, task: impl Into<String>) -> Self {
        Self {
            id,
            task: task.into(),
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

/// Partial update of a task. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub task: Option<String>,
    pub status: Option<String>,
}

impl TaskPatch {
    pub fn task(task: impl Into<String>) -> Self {
        Self {
            task: Some(task.into()),
            status: None,
        }
    }

    pub fn status(status: impl Into<String>) -> Self {
        Self {
            task: None,
            status: Some(status.into()),
        }
    }

    /// Set the status on an existing patch
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Reject patches that would write nothing or write a blank value.
    pub fn validate(&self) -> Result<()> {
        if self.task.is_none() && self.status.is_none() {
            return Err(Error::InvalidInput(
                "At least one of task or status is required".to_string(),
            ));
        }
        if self.task.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(Error::InvalidInput("Task cannot be empty".to_string()));
        }
        if self.status.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(Error::InvalidInput("Status cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Validate the label of a task about to be created.
pub fn validate_task_text(task: &str) -> Result<()> {
    if task.trim().is_empty() {
        return Err(Error::InvalidInput("Task cannot be empty".to_string()));
    }
    Ok(())
}
