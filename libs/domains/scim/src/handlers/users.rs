use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{body, ListQuery, TAG};
use crate::error::{ScimErrorBody, ScimResult};
use crate::models::{ListResponse, PatchRequest, User, UserPayload};
use crate::store::ScimStore;

/// List users
#[utoipa::path(
    get,
    path = "/scim/v2/Users",
    tag = TAG,
    params(ListQuery),
    responses((status = 200, description = "Users", body = ListResponse<User>))
)]
pub(super) async fn list_users(
    State(store): State<Arc<ScimStore>>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse<User>> {
    let users = store.list_users(query.filter.as_deref()).await;
    tracing::debug!(count = users.len(), filter = ?query.filter, "Listing SCIM users");
    Json(ListResponse::new(users))
}

/// Provision a user
#[utoipa::path(
    post,
    path = "/scim/v2/Users",
    tag = TAG,
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing userName", body = ScimErrorBody),
        (status = 409, description = "Duplicate userName", body = ScimErrorBody)
    )
)]
pub(super) async fn create_user(
    State(store): State<Arc<ScimStore>>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ScimResult<impl IntoResponse> {
    let user = store.create_user(body(payload)?).await?;
    let location = user.meta.location.clone();

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/scim/v2/Users/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ScimErrorBody)
    )
)]
pub(super) async fn get_user(
    State(store): State<Arc<ScimStore>>,
    Path(id): Path<String>,
) -> ScimResult<Json<User>> {
    Ok(Json(store.get_user(&id).await?))
}

/// Replace the attributes given in the body
#[utoipa::path(
    put,
    path = "/scim/v2/Users/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "User ID")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid body", body = ScimErrorBody),
        (status = 404, description = "User not found", body = ScimErrorBody)
    )
)]
pub(super) async fn replace_user(
    State(store): State<Arc<ScimStore>>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ScimResult<Json<User>> {
    Ok(Json(store.replace_user(&id, body(payload)?).await?))
}

/// Patch `active`
#[utoipa::path(
    patch,
    path = "/scim/v2/Users/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "User ID")),
    request_body = PatchRequest,
    responses(
        (status = 200, description = "User patched", body = User),
        (status = 400, description = "Invalid PATCH body", body = ScimErrorBody),
        (status = 404, description = "User not found", body = ScimErrorBody)
    )
)]
pub(super) async fn patch_user(
    State(store): State<Arc<ScimStore>>,
    Path(id): Path<String>,
    payload: Result<Json<PatchRequest>, JsonRejection>,
) -> ScimResult<Json<User>> {
    Ok(Json(store.patch_user(&id, body(payload)?).await?))
}

/// Deprovision a user
#[utoipa::path(
    delete,
    path = "/scim/v2/Users/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ScimErrorBody)
    )
)]
pub(super) async fn delete_user(
    State(store): State<Arc<ScimStore>>,
    Path(id): Path<String>,
) -> ScimResult<StatusCode> {
    store.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
