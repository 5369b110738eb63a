use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::types::{CreateTaskInput, UpdateTaskInput};
use crate::models::Task;
use crate::service::TaskService;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_task(&self, ctx: &Context<'_>, data: CreateTaskInput) -> Result<Task> {
        let service = ctx.data::<TaskService>()?;
        service
            .create_task(data.into())
            .await
            .map_err(|e| e.extend())
    }

    /// Broadcasts the result on `taskUpdated`
    async fn update_task(&self, ctx: &Context<'_>, data: UpdateTaskInput) -> Result<Task> {
        let service = ctx.data::<TaskService>()?;
        let (id, update) = data.into_parts().map_err(|e| e.extend())?;
        service.update_task(&id, update).await.map_err(|e| e.extend())
    }
}
