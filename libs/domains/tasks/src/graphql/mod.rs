//! GraphQL schema for tasks.

mod mutation;
mod query;
mod subscription;
pub mod types;

use async_graphql::Schema;

use crate::service::TaskService;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use subscription::SubscriptionRoot;
pub use types::{CreateTaskInput, TaskConnection, TaskEdge, UpdateTaskInput};

pub type TaskSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the executable schema with `service` as resolver context.
pub fn build_schema(service: TaskService) -> TaskSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(service)
        .finish()
}
