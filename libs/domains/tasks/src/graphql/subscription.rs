use async_graphql::{Context, Result, Subscription};
use futures::Stream;

use crate::models::Task;
use crate::service::TaskService;

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Every task successfully updated after subscribing
    async fn task_updated(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = Task>> {
        let service = ctx.data::<TaskService>()?;
        Ok(service.subscribe_updates())
    }
}
