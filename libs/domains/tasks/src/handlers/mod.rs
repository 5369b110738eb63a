//! HTTP routes for the task GraphQL API.

mod mock;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQL, GraphQLSubscription};
use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::graphql::TaskSchema;

pub use mock::{mock_router, MockGraphQLRequest, DEFAULT_PAGE_SIZE};

const GRAPHQL_ENDPOINT: &str = "/api/graphql";
const SUBSCRIPTION_ENDPOINT: &str = "/api/graphql/ws";

/// GraphQL routes, meant to be nested at `/graphql` under `/api`.
///
/// - `POST /`: queries and mutations
/// - `GET /`: GraphiQL
/// - `GET /ws`: subscriptions over WebSocket
pub fn router(schema: TaskSchema) -> Router {
    Router::new()
        .route("/", get(graphiql).post_service(GraphQL::new(schema.clone())))
        .route_service("/ws", GraphQLSubscription::new(schema))
}

async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(GRAPHQL_ENDPOINT)
            .subscription_endpoint(SUBSCRIPTION_ENDPOINT)
            .finish(),
    )
}
