use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{CreateTask, Task, UpdateTask},
    repository::TaskRepository,
};

/// PostgreSQL-backed task store
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let task = Task::new(input, chrono::Utc::now());
        let model = entity::ActiveModel::from(&task).insert(&self.db).await?;

        tracing::info!(task_id = %model.id, "Created task");
        Ok(model.into())
    }

    async fn update(&self, id: &str, input: UpdateTask) -> TaskResult<Task> {
        let existing = entity::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        // Loaded columns stay Unchanged; only Set columns reach the UPDATE.
        let mut active: entity::ActiveModel = existing.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(assignee_id) = input.assignee_id.into_change() {
            active.assignee_id = Set(assignee_id);
        }
        if let Some(deadline) = input.deadline.into_change() {
            active.deadline = Set(deadline.map(Into::into));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => TaskError::NotFound(id.to_string()),
            other => other.into(),
        })?;

        tracing::info!(task_id = %model.id, "Updated task");
        Ok(model.into())
    }
}
