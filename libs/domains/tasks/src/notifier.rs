//! Outbound notification of task updates.

use async_trait::async_trait;
use core_config::{env_optional, ConfigError, FromEnv};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{NotificationError, NotificationResult};
use crate::models::Task;

/// Sink for "task updated" messages.
///
/// Callers log a failure and carry on; it never fails the update itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskNotifier: Send + Sync {
    async fn notify(&self, task: &Task) -> NotificationResult<()>;

    fn name(&self) -> &'static str;
}

/// Slack incoming-webhook configuration.
#[derive(Debug, Clone, Default)]
pub struct SlackConfig {
    /// Delivery is skipped when unset.
    pub webhook_url: Option<String>,
}

impl SlackConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: Some(webhook_url.into()),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

impl FromEnv for SlackConfig {
    /// - SLACK_WEBHOOK_URL: optional
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            webhook_url: env_optional("SLACK_WEBHOOK_URL"),
        })
    }
}

#[derive(Debug, Serialize)]
struct SlackMessage {
    text: String,
}

/// Posts a plain-text summary of each updated task to a Slack webhook.
pub struct SlackNotifier {
    config: SlackConfig,
    client: Client,
}

impl SlackNotifier {
    pub fn new(config: SlackConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(SlackConfig::from_env()?))
    }

    pub fn is_enabled(&self) -> bool {
        self.config.webhook_url.is_some()
    }
}

/// Message body sent for an updated task.
pub fn format_message(task: &Task) -> String {
    let assignee = task.assignee_id.as_deref().unwrap_or("Unassigned");
    let deadline = task
        .deadline
        .map(|d| d.to_rfc3339())
        .unwrap_or_else(|| "Not set".to_string());

    format!(
        "Task Updated:\n  ID: {}\n  Title: {}\n  Assignee ID: {}\n  Status: {}\n  Deadline: {}",
        task.id, task.title, assignee, task.status, deadline
    )
}

#[async_trait]
impl TaskNotifier for SlackNotifier {
    async fn notify(&self, task: &Task) -> NotificationResult<()> {
        let Some(url) = self.config.webhook_url.as_deref() else {
            warn!(task_id = %task.id, "SLACK_WEBHOOK_URL is not set, skipping Slack notification");
            return Ok(());
        };

        let message = SlackMessage {
            text: format_message(task),
        };

        debug!(task_id = %task.id, "Sending Slack notification");

        let response = self
            .client
            .post(url)
            .json(&message)
            .send()
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(task_id = %task.id, "Slack notification sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "slack"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateTask, TaskStatus};
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<serde_json::Value>>>;

    async fn spawn_webhook(status: StatusCode) -> (String, Captured) {
        let captured: Captured = Arc::default();

        let app = Router::new()
            .route(
                "/hook",
                post(
                    move |State(captured): State<Captured>, Json(body): Json<serde_json::Value>| async move {
                        captured.lock().unwrap().push(body);
                        (status, "done")
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/hook", addr), captured)
    }

    fn task() -> Task {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap();
        let mut input = CreateTask::new("Ship release");
        input.status = TaskStatus::InProgress;
        let mut task = Task::new(input, now);
        task.id = "42".to_string();
        task
    }

    #[test]
    fn test_format_message_without_optional_fields() {
        assert_eq!(
            format_message(&task()),
            "Task Updated:\n  ID: 42\n  Title: Ship release\n  Assignee ID: Unassigned\n  Status: IN_PROGRESS\n  Deadline: Not set"
        );
    }

    #[test]
    fn test_format_message_with_assignee_and_deadline() {
        let mut task = task();
        task.assignee_id = Some("user_2".to_string());
        task.deadline = Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());

        let text = format_message(&task);
        assert!(text.contains("Assignee ID: user_2"));
        assert!(text.contains("Deadline: 2024-04-01T00:00:00+00:00"));
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_var("SLACK_WEBHOOK_URL", Some("https://hooks.example/x"), || {
            let config = SlackConfig::from_env().unwrap();
            assert_eq!(config.webhook_url.as_deref(), Some("https://hooks.example/x"));
        });
        temp_env::with_var_unset("SLACK_WEBHOOK_URL", || {
            assert!(SlackConfig::from_env().unwrap().webhook_url.is_none());
        });
    }

    #[tokio::test]
    async fn test_notify_without_webhook_is_noop() {
        let notifier = SlackNotifier::new(SlackConfig::disabled());
        assert!(!notifier.is_enabled());
        assert!(notifier.notify(&task()).await.is_ok());
    }

    #[tokio::test]
    async fn test_notify_posts_text_payload() {
        let (url, captured) = spawn_webhook(StatusCode::OK).await;
        let notifier = SlackNotifier::new(SlackConfig::new(url));

        notifier.notify(&task()).await.unwrap();

        let bodies = captured.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["text"], format_message(&task()));
    }

    #[tokio::test]
    async fn test_notify_reports_rejection() {
        let (url, _captured) = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR).await;
        let notifier = SlackNotifier::new(SlackConfig::new(url));

        let err = notifier.notify(&task()).await.unwrap_err();
        assert!(matches!(err, NotificationError::Rejected { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_notify_reports_unreachable_webhook() {
        let notifier = SlackNotifier::new(SlackConfig::new("http://127.0.0.1:1/hook"));

        let err = notifier.notify(&task()).await.unwrap_err();
        assert!(matches!(err, NotificationError::Delivery(_)));
    }
}
