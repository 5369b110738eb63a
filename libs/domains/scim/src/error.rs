use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub const ERROR_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:Error";

#[derive(Debug, Error)]
pub enum ScimError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    /// Duplicate `userName` / `displayName`
    #[error("{0}")]
    Uniqueness(String),

    #[error("Method {0} not supported.")]
    MethodNotAllowed(String),
}

pub type ScimResult<T> = Result<T, ScimError>;

/// SCIM error envelope (RFC 7644 §3.12)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScimErrorBody {
    pub schemas: Vec<String>,
    pub detail: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scim_type: Option<String>,
}

impl ScimError {
    pub fn status(&self) -> StatusCode {
        match self {
            ScimError::NotFound(_) => StatusCode::NOT_FOUND,
            ScimError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ScimError::Uniqueness(_) => StatusCode::CONFLICT,
            ScimError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ScimError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::info!(%status, error = %self, "SCIM request rejected");

        let body = ScimErrorBody {
            schemas: vec![ERROR_SCHEMA.to_string()],
            detail: self.to_string(),
            status: status.as_u16().to_string(),
            scim_type: matches!(self, ScimError::Uniqueness(_)).then(|| "uniqueness".to_string()),
        };

        (status, Json(body)).into_response()
    }
}
