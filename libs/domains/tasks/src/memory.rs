use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::{
    error::{TaskError, TaskResult},
    models::{CreateTask, Task, TaskStatus, UpdateTask},
    repository::TaskRepository,
};

/// Process-local task store, lost on restart
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }

    /// Store holding the two sample records served at startup.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let initial = Task::new(CreateTask::new("Initial Task"), now);

        let mut another = CreateTask::new("Another Task");
        another.assignee_id = Some("user123".to_string());
        another.status = TaskStatus::InProgress;
        another.deadline = Some(now + Duration::days(7));

        Self::with_tasks(vec![initial, Task::new(another, now)])
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> TaskResult<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let task = Task::new(input, Utc::now());
        self.tasks.write().await.push(task.clone());

        tracing::info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    async fn update(&self, id: &str, input: UpdateTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        task.apply_update(input, Utc::now());

        tracing::info!(task_id = %task.id, "Updated task");
        Ok(task.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Patch;

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let repo = InMemoryTaskRepository::new();

        let a = repo.create(CreateTask::new("A")).await.unwrap();
        let b = repo.create(CreateTask::new("B")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);

        let all = repo.list().await.unwrap();
        assert_eq!(all.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), ["A", "B"]);
    }

    #[tokio::test]
    async fn test_update_omitting_deadline_preserves_it() {
        let repo = InMemoryTaskRepository::seeded(Utc::now());
        let another = repo.list().await.unwrap().remove(1);
        assert!(another.deadline.is_some());

        let updated = repo
            .update(
                &another.id,
                UpdateTask {
                    status: Some(TaskStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.deadline, another.deadline);
        assert!(updated.updated_at >= another.updated_at);
    }

    #[tokio::test]
    async fn test_update_with_null_deadline_clears_it() {
        let repo = InMemoryTaskRepository::seeded(Utc::now());
        let another = repo.list().await.unwrap().remove(1);

        let updated = repo
            .update(
                &another.id,
                UpdateTask {
                    deadline: Patch::Clear,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.deadline, None);
        assert_eq!(updated.assignee_id.as_deref(), Some("user123"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_unchanged() {
        let repo = InMemoryTaskRepository::seeded(Utc::now());
        let before = repo.list().await.unwrap();

        let result = repo
            .update(
                "missing",
                UpdateTask {
                    title: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(TaskError::NotFound(id)) if id == "missing"));
        assert_eq!(repo.list().await.unwrap(), before);
    }
}
