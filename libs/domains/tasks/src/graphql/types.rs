use async_graphql::{InputObject, MaybeUndefined, SimpleObject, ID};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::pagination::{Page, PageInfo};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct TaskEdge {
    pub node: Task,
    pub cursor: String,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct TaskConnection {
    pub edges: Vec<TaskEdge>,
    pub page_info: PageInfo,
    pub total_count: i32,
}

impl From<Page<Task>> for TaskConnection {
    fn from(page: Page<Task>) -> Self {
        Self {
            edges: page
                .edges
                .into_iter()
                .map(|e| TaskEdge {
                    node: e.node,
                    cursor: e.cursor,
                })
                .collect(),
            page_info: page.page_info,
            total_count: i32::try_from(page.total_count).unwrap_or(i32::MAX),
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreateTaskInput {
    pub title: String,
    pub assignee_id: Option<String>,
    #[graphql(default)]
    pub status: TaskStatus,
    pub deadline: Option<DateTime<Utc>>,
}

impl From<CreateTaskInput> for CreateTask {
    fn from(input: CreateTaskInput) -> Self {
        Self {
            title: input.title,
            assignee_id: input.assignee_id,
            status: input.status,
            deadline: input.deadline,
        }
    }
}

/// Omitted fields are left alone; `null` clears `assigneeId` and `deadline`.
#[derive(Debug, InputObject)]
pub struct UpdateTaskInput {
    pub id: ID,
    pub title: MaybeUndefined<String>,
    pub assignee_id: MaybeUndefined<String>,
    pub status: MaybeUndefined<TaskStatus>,
    pub deadline: MaybeUndefined<DateTime<Utc>>,
}

fn required<T>(field: &str, value: MaybeUndefined<T>) -> TaskResult<Option<T>> {
    match value {
        MaybeUndefined::Undefined => Ok(None),
        MaybeUndefined::Null => Err(TaskError::Validation(format!("{field} cannot be null"))),
        MaybeUndefined::Value(v) => Ok(Some(v)),
    }
}

impl UpdateTaskInput {
    /// Split into the target id and the change set.
    pub fn into_parts(self) -> TaskResult<(String, UpdateTask)> {
        let update = UpdateTask {
            title: required("title", self.title)?,
            assignee_id: self.assignee_id.into(),
            status: required("status", self.status)?,
            deadline: self.deadline.into(),
        };
        Ok((self.id.to_string(), update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Patch;

    fn input() -> UpdateTaskInput {
        UpdateTaskInput {
            id: ID::from("3"),
            title: MaybeUndefined::Undefined,
            assignee_id: MaybeUndefined::Undefined,
            status: MaybeUndefined::Undefined,
            deadline: MaybeUndefined::Undefined,
        }
    }

    #[test]
    fn test_null_deadline_becomes_clear() {
        let (id, update) = UpdateTaskInput {
            deadline: MaybeUndefined::Null,
            ..input()
        }
        .into_parts()
        .unwrap();

        assert_eq!(id, "3");
        assert_eq!(update.deadline, Patch::Clear);
        assert_eq!(update.assignee_id, Patch::Unset);
    }

    #[test]
    fn test_null_title_is_rejected() {
        let result = UpdateTaskInput {
            title: MaybeUndefined::Null,
            ..input()
        }
        .into_parts();

        assert!(matches!(result, Err(TaskError::Validation(msg)) if msg.contains("title")));
    }
}
