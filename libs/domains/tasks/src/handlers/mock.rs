//! Canned `GetTasks` responses for frontend development.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::fixtures::fixture_tasks;
use crate::graphql::TaskConnection;
use crate::models::Task;
use crate::pagination::{paginate, PageArgs};

pub const DEFAULT_PAGE_SIZE: usize = 5;

const OPERATION: &str = "GetTasks";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockGraphQLRequest {
    pub query: Option<String>,
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: Option<MockVariables>,
}

/// Kept loose so odd client values fall back to defaults instead of failing.
#[derive(Debug, Default, Deserialize)]
pub struct MockVariables {
    pub first: Option<Value>,
    pub after: Option<Value>,
}

impl MockGraphQLRequest {
    fn operation(&self) -> Option<&str> {
        if let Some(name) = self.operation_name.as_deref() {
            return Some(name);
        }
        // "query GetTasks(...) { ... }"
        let query = self.query.as_deref()?;
        let rest = query.trim_start().strip_prefix("query")?.trim_start();
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        Some(&rest[..end]).filter(|name| !name.is_empty())
    }

    fn page_args(&self) -> PageArgs {
        let variables = self.variables.as_ref();
        let first = variables
            .and_then(|v| v.first.as_ref())
            .and_then(|first| match first {
                Value::String(s) => s.trim().parse::<usize>().ok(),
                other => other.as_u64().and_then(|n| usize::try_from(n).ok()),
            })
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let after = variables
            .and_then(|v| v.after.as_ref())
            .and_then(Value::as_str)
            .map(str::to_string);

        PageArgs::forward(first, after)
    }
}

/// Mock GraphQL endpoint serving fixed fixtures, nested at `/mock` under `/api`.
pub fn mock_router(anchor: DateTime<Utc>) -> Router {
    Router::new()
        .route("/graphql", post(mock_graphql))
        .with_state(Arc::new(fixture_tasks(anchor)))
}

fn graphql_error(message: String) -> Json<Value> {
    Json(json!({ "errors": [{ "message": message }] }))
}

async fn mock_graphql(
    State(tasks): State<Arc<Vec<Task>>>,
    payload: Result<Json<MockGraphQLRequest>, JsonRejection>,
) -> Json<Value> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable mock GraphQL request");
            return graphql_error(format!("Invalid GraphQL request: {}", rejection.body_text()));
        }
    };

    match request.operation() {
        Some(OPERATION) => {
            let connection = TaskConnection::from(paginate(tasks.to_vec(), &request.page_args()));
            tracing::debug!(returned = connection.edges.len(), "Served mock GetTasks");
            Json(json!({ "data": { "tasks": connection } }))
        }
        other => graphql_error(format!(
            "No mock handler for operation {}",
            other.unwrap_or("<anonymous>")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::TimeZone;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn call(body: Value) -> Value {
        call_raw(body.to_string()).await
    }

    async fn call_raw(body: String) -> Value {
        let anchor = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let response = mock_router(anchor)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/graphql")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_tasks_defaults_to_five() {
        let json = call(json!({ "operationName": "GetTasks", "variables": {} })).await;

        let tasks = &json["data"]["tasks"];
        assert_eq!(tasks["edges"].as_array().unwrap().len(), 5);
        assert_eq!(tasks["totalCount"], 15);
        assert_eq!(tasks["pageInfo"]["hasNextPage"], true);
        assert_eq!(tasks["pageInfo"]["endCursor"], "Y3Vyc29yOjQ=");
        assert_eq!(tasks["edges"][0]["node"]["title"], "Task 1: Implement feature 1");
        assert_eq!(tasks["edges"][0]["node"]["assigneeId"], Value::Null);
    }

    #[tokio::test]
    async fn test_get_tasks_follows_after_cursor() {
        let json = call(json!({
            "query": "query GetTasks($first: Int, $after: String) { tasks(first: $first, after: $after) { totalCount } }",
            "variables": { "first": 5, "after": "Y3Vyc29yOjQ=" }
        }))
        .await;

        let edges = json["data"]["tasks"]["edges"].as_array().unwrap();
        let ids: Vec<_> = edges.iter().map(|e| e["node"]["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["6", "7", "8", "9", "10"]);
    }

    #[tokio::test]
    async fn test_unknown_operation_returns_error() {
        let json = call(json!({ "operationName": "GetUsers" })).await;

        assert!(json["data"].is_null());
        assert!(json["errors"][0]["message"].as_str().unwrap().contains("GetUsers"));
    }

    #[tokio::test]
    async fn test_non_integer_first_falls_back_or_parses() {
        let parsed = call(json!({ "operationName": "GetTasks", "variables": { "first": "3" } })).await;
        assert_eq!(parsed["data"]["tasks"]["edges"].as_array().unwrap().len(), 3);

        for odd in [json!(5.5), json!("many"), json!(-2), json!(true)] {
            let json = call(json!({ "operationName": "GetTasks", "variables": { "first": odd } })).await;
            assert_eq!(
                json["data"]["tasks"]["edges"].as_array().unwrap().len(),
                DEFAULT_PAGE_SIZE
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_body_returns_graphql_error() {
        let json = call_raw("{ not json".to_string()).await;

        assert!(json["data"].is_null());
        assert!(
            json["errors"][0]["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid GraphQL request")
        );
    }
}
