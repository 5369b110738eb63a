use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::notifier::TaskNotifier;
use crate::pagination::{paginate, Page, PageArgs};
use crate::pubsub::{EventStream, PubSub, TASK_UPDATED};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
///
/// Successful updates are published on [`TASK_UPDATED`] and handed to the
/// notifier. Notification failures are logged and never returned.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    events: PubSub<Task>,
    notifier: Arc<dyn TaskNotifier>,
}

impl TaskService {
    pub fn new(
        repository: impl TaskRepository + 'static,
        notifier: impl TaskNotifier + 'static,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            events: PubSub::new(),
            notifier: Arc::new(notifier),
        }
    }

    pub fn events(&self) -> &PubSub<Task> {
        &self.events
    }

    #[instrument(skip(self))]
    pub async fn list_tasks(&self, args: &PageArgs) -> TaskResult<Page<Task>> {
        let tasks = self.repository.list().await?;
        Ok(paginate(tasks, args))
    }

    pub async fn find_task(&self, id: &str) -> TaskResult<Option<Task>> {
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: &str) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input.validate()?;

        self.repository.create(input).await
    }

    /// Apply a partial update, then publish and notify.
    ///
    /// An update with no fields returns the stored record untouched but is
    /// still published and notified.
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: &str, input: UpdateTask) -> TaskResult<Task> {
        input.validate()?;

        let task = if input.is_empty() {
            debug!("Update carries no fields, returning stored task");
            self.get_task(id).await?
        } else {
            self.repository.update(id, input).await?
        };

        let delivered = self.events.publish(TASK_UPDATED, &task);
        debug!(topic = TASK_UPDATED, subscribers = delivered, "Published task update");

        match self.notifier.notify(&task).await {
            Ok(()) => info!(notifier = self.notifier.name(), "Task update notified"),
            Err(e) => error!(
                notifier = self.notifier.name(),
                error = %e,
                "Failed to send task update notification"
            ),
        }

        Ok(task)
    }

    pub fn subscribe_updates(&self) -> EventStream<Task> {
        self.events.subscribe(TASK_UPDATED)
    }
}
