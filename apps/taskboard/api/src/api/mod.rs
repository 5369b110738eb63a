use axum::{routing::get, Router};
use chrono::Utc;
use tracing::info;

pub mod health;

use crate::state::AppState;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// - `/graphql`: queries, mutations, GraphiQL and `/graphql/ws` subscriptions
/// - `/mock/graphql`: fixture-backed `GetTasks`, development only
pub fn routes(state: &AppState) -> Router {
    let router = Router::new().nest(
        "/graphql",
        domain_tasks::handlers::router(state.schema.clone()),
    );

    if state.config.mock_graphql_enabled() {
        info!("Mock GraphQL endpoint enabled at /api/mock/graphql");
        router.nest("/mock", domain_tasks::handlers::mock_router(Utc::now()))
    } else {
        router
    }
}

/// SCIM provisioning stubs, mounted at the root under `/scim/v2`.
pub fn scim_router(state: &AppState) -> Router {
    domain_scim::router(state.scim.clone())
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment, TaskStoreBackend};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use core_config::{app_info, server::ServerConfig};
    use domain_tasks::{InMemoryTaskRepository, SlackConfig, SlackNotifier, TaskService};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn state(environment: Environment, mock_graphql: bool) -> AppState {
        let config = Config {
            app: app_info!(),
            server: ServerConfig::default(),
            environment,
            store: TaskStoreBackend::Memory,
            database: None,
            run_migrations: false,
            mock_graphql,
        };
        let tasks = TaskService::new(
            InMemoryTaskRepository::seeded(Utc::now()),
            SlackNotifier::new(SlackConfig::disabled()),
        );
        AppState::new(config, tasks, None)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_graphql_route_serves_seeded_tasks() {
        let app = routes(&state(Environment::Development, false));

        let response = app
            .oneshot(post_json(
                "/graphql",
                json!({ "query": "{ tasks { totalCount edges { node { title } } } }" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["tasks"]["totalCount"], 2);
        assert_eq!(body["data"]["tasks"]["edges"][0]["node"]["title"], "Initial Task");
    }

    #[tokio::test]
    async fn test_mock_route_mounted_when_enabled() {
        let app = routes(&state(Environment::Development, true));

        let response = app
            .oneshot(post_json(
                "/mock/graphql",
                json!({ "operationName": "GetTasks", "query": "query GetTasks { tasks { totalCount } }" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["tasks"]["totalCount"], 15);
        assert_eq!(body["data"]["tasks"]["edges"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_mock_route_absent_in_production() {
        let app = routes(&state(Environment::Production, true));

        let response = app
            .oneshot(post_json("/mock/graphql", json!({ "operationName": "GetTasks" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ready_without_database() {
        let app = ready_router(state(Environment::Development, false));

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "ready" }));
    }

    #[tokio::test]
    async fn test_scim_router_is_mounted_at_root() {
        let app = scim_router(&state(Environment::Development, false));

        let response = app
            .oneshot(Request::builder().uri("/scim/v2/Users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["totalResults"], 0);
    }
}
