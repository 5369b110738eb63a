use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task, UpdateTask};

/// Storage backend for tasks
///
/// `list` returns every record in creation order; pagination is applied on top.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list(&self) -> TaskResult<Vec<Task>>;

    async fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>>;

    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    /// Persist only the fields present in `input`.
    ///
    /// Fails with `NotFound` and writes nothing when `id` is unknown.
    async fn update(&self, id: &str, input: UpdateTask) -> TaskResult<Task>;
}
