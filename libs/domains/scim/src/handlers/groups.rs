use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{body, ListQuery, TAG};
use crate::error::{ScimErrorBody, ScimResult};
use crate::models::{Group, GroupPayload, ListResponse, PatchRequest};
use crate::store::ScimStore;

/// List groups
#[utoipa::path(
    get,
    path = "/scim/v2/Groups",
    tag = TAG,
    params(ListQuery),
    responses((status = 200, description = "Groups", body = ListResponse<Group>))
)]
pub(super) async fn list_groups(
    State(store): State<Arc<ScimStore>>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse<Group>> {
    let groups = store.list_groups(query.filter.as_deref()).await;
    tracing::debug!(count = groups.len(), filter = ?query.filter, "Listing SCIM groups");
    Json(ListResponse::new(groups))
}

/// Create a group
#[utoipa::path(
    post,
    path = "/scim/v2/Groups",
    tag = TAG,
    request_body = GroupPayload,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "Missing displayName", body = ScimErrorBody),
        (status = 409, description = "Duplicate displayName", body = ScimErrorBody)
    )
)]
pub(super) async fn create_group(
    State(store): State<Arc<ScimStore>>,
    payload: Result<Json<GroupPayload>, JsonRejection>,
) -> ScimResult<impl IntoResponse> {
    let group = store.create_group(body(payload)?).await?;
    let location = group.meta.location.clone();

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(group)))
}

/// Get a group by id
#[utoipa::path(
    get,
    path = "/scim/v2/Groups/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group found", body = Group),
        (status = 404, description = "Group not found", body = ScimErrorBody)
    )
)]
pub(super) async fn get_group(
    State(store): State<Arc<ScimStore>>,
    Path(id): Path<String>,
) -> ScimResult<Json<Group>> {
    Ok(Json(store.get_group(&id).await?))
}

/// Replace the attributes given in the body
#[utoipa::path(
    put,
    path = "/scim/v2/Groups/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "Group ID")),
    request_body = GroupPayload,
    responses(
        (status = 200, description = "Group updated", body = Group),
        (status = 400, description = "Invalid body", body = ScimErrorBody),
        (status = 404, description = "Group not found", body = ScimErrorBody)
    )
)]
pub(super) async fn replace_group(
    State(store): State<Arc<ScimStore>>,
    Path(id): Path<String>,
    payload: Result<Json<GroupPayload>, JsonRejection>,
) -> ScimResult<Json<Group>> {
    Ok(Json(store.replace_group(&id, body(payload)?).await?))
}

/// Patch members or `displayName`
#[utoipa::path(
    patch,
    path = "/scim/v2/Groups/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "Group ID")),
    request_body = PatchRequest,
    responses(
        (status = 200, description = "Group patched", body = Group),
        (status = 400, description = "Invalid PATCH body", body = ScimErrorBody),
        (status = 404, description = "Group not found", body = ScimErrorBody)
    )
)]
pub(super) async fn patch_group(
    State(store): State<Arc<ScimStore>>,
    Path(id): Path<String>,
    payload: Result<Json<PatchRequest>, JsonRejection>,
) -> ScimResult<Json<Group>> {
    Ok(Json(store.patch_group(&id, body(payload)?).await?))
}

/// Delete a group
#[utoipa::path(
    delete,
    path = "/scim/v2/Groups/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "Group ID")),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 404, description = "Group not found", body = ScimErrorBody)
    )
)]
pub(super) async fn delete_group(
    State(store): State<Arc<ScimStore>>,
    Path(id): Path<String>,
) -> ScimResult<StatusCode> {
    store.delete_group(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
