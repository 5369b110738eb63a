use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::graphql::types::TaskConnection;
use crate::models::Task;
use crate::pagination::PageArgs;
use crate::service::TaskService;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Tasks in creation order, paginated by cursor
    async fn tasks(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<TaskConnection> {
        let service = ctx.data::<TaskService>()?;
        let args = PageArgs::from_graphql(first, after, last, before).map_err(|e| e.extend())?;
        let page = service.list_tasks(&args).await.map_err(|e| e.extend())?;
        Ok(page.into())
    }

    async fn task(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Task>> {
        let service = ctx.data::<TaskService>()?;
        service.find_task(&id).await.map_err(|e| e.extend())
    }
}
