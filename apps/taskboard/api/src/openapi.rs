use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa::{Modify, OpenApi};

/// Folds the SCIM paths into the application document.
///
/// SCIM is served from the root rather than `/api`, so its paths keep their
/// absolute `/scim/v2` prefix instead of being nested.
struct ScimPaths;

impl Modify for ScimPaths {
    fn modify(&self, openapi: &mut OpenApiSpec) {
        openapi.merge(domain_scim::ApiDoc::openapi());
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&ScimPaths),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Taskboard API",
        version = "0.1.0",
        description = "Task tracking over GraphQL at /api/graphql, plus SCIM provisioning stubs"
    )
)]
pub struct ApiDoc;
