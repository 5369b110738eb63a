mod groups;
mod users;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::Method,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

use crate::error::{ScimError, ScimErrorBody, ScimResult};
use crate::models::{
    Email, Group, GroupPayload, Member, Meta, Name, PatchOperation, PatchRequest, User,
    UserPayload, SCIM_BASE_PATH,
};
use crate::store::ScimStore;

pub const TAG: &str = "SCIM";

/// OpenAPI documentation for the SCIM endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        users::list_users,
        users::create_user,
        users::get_user,
        users::replace_user,
        users::patch_user,
        users::delete_user,
        groups::list_groups,
        groups::create_group,
        groups::get_group,
        groups::replace_group,
        groups::patch_group,
        groups::delete_group,
    ),
    components(schemas(
        User, UserPayload, Name, Email, Group, GroupPayload, Member, Meta,
        PatchRequest, PatchOperation, ScimErrorBody
    )),
    tags((name = TAG, description = "SCIM 2.0 provisioning stubs"))
)]
pub struct ApiDoc;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Only `userName eq "..."` / `displayName eq "..."` are understood
    pub filter: Option<String>,
}

/// Unwrap a JSON body, mapping any rejection to a SCIM 400.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ScimResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|_| ScimError::BadRequest("Request body is missing or invalid".to_string()))
}

async fn method_not_allowed(method: Method) -> ScimError {
    ScimError::MethodNotAllowed(method.to_string())
}

/// SCIM routes, mounted at the application root under `/scim/v2`.
pub fn router(store: Arc<ScimStore>) -> Router {
    let users = format!("{SCIM_BASE_PATH}/Users");
    let groups = format!("{SCIM_BASE_PATH}/Groups");

    Router::new()
        .route(
            &users,
            get(users::list_users)
                .post(users::create_user)
                .fallback(method_not_allowed),
        )
        .route(
            &format!("{users}/{{id}}"),
            get(users::get_user)
                .put(users::replace_user)
                .patch(users::patch_user)
                .delete(users::delete_user)
                .fallback(method_not_allowed),
        )
        .route(
            &groups,
            get(groups::list_groups)
                .post(groups::create_group)
                .fallback(method_not_allowed),
        )
        .route(
            &format!("{groups}/{{id}}"),
            get(groups::get_group)
                .put(groups::replace_group)
                .patch(groups::patch_group)
                .delete(groups::delete_group)
                .fallback(method_not_allowed),
        )
        .with_state(store)
}
