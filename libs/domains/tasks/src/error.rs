use async_graphql::ErrorExtensions;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task with ID {0} not found")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    /// Machine-readable code placed in GraphQL `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            TaskError::NotFound(_) => "NOT_FOUND",
            TaskError::Validation(_) => "VALIDATION_ERROR",
            TaskError::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl ErrorExtensions for TaskError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

impl From<ValidationErrors> for TaskError {
    fn from(err: ValidationErrors) -> Self {
        TaskError::Validation(err.to_string())
    }
}

/// Failure to deliver an outbound task notification.
///
/// Always logged by the caller, never surfaced to the mutation.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Webhook request failed: {0}")]
    Delivery(String),

    #[error("Webhook rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub type NotificationResult<T> = Result<T, NotificationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_carries_code() {
        let err = TaskError::NotFound("42".to_string()).extend();
        assert_eq!(err.message, "Task with ID 42 not found");

        let extensions = err.extensions.expect("extensions should be set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("NOT_FOUND"))
        );
    }

    #[test]
    fn test_every_variant_has_a_graphql_code() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("title", validator::ValidationError::new("length"));

        let validation: TaskError = errors.into();
        assert_eq!(validation.code(), "VALIDATION_ERROR");
        assert_eq!(TaskError::NotFound("1".into()).code(), "NOT_FOUND");
        assert_eq!(TaskError::Database("down".into()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err: TaskError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert!(err.to_string().contains("boom"));
    }
}
