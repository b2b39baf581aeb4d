//! Application state

use std::sync::Arc;

use todo_core::task::TaskRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    tasks: Box<dyn TaskRepository>,
}

impl AppState {
    /// Create a new AppState around the given task repository
    pub fn new(tasks: impl TaskRepository + 'static) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                tasks: Box::new(tasks),
            }),
        }
    }

    /// Get reference to the task repository
    pub fn tasks(&self) -> &dyn TaskRepository {
        self.inner.tasks.as_ref()
    }
}
