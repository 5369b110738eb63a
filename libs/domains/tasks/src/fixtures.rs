//! Deterministic sample tasks served by the development mock endpoint.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::models::{Task, TaskStatus};

pub const FIXTURE_COUNT: usize = 15;

const STATUSES: [TaskStatus; 3] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Completed,
];

/// Fixture number `i` (zero-based), timestamped relative to `anchor`.
pub fn fixture_task(i: usize, anchor: DateTime<Utc>) -> Task {
    let id = i + 1;
    let created_at = anchor - Duration::days((FIXTURE_COUNT - i) as i64);
    let updated_at = created_at + Duration::days((i % 3) as i64);

    let assignee_id = (i % 5 != 0).then(|| format!("user_{}", (i % 3) + 1));
    let deadline = (i % 4 != 0).then(|| {
        (updated_at + Duration::days(2 * i as i64))
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc()
    });

    Task {
        id: id.to_string(),
        title: format!("Task {id}: Implement feature {id}"),
        assignee_id,
        status: STATUSES[i % STATUSES.len()],
        deadline,
        created_at,
        updated_at,
    }
}

pub fn fixture_tasks(anchor: DateTime<Utc>) -> Vec<Task> {
    (0..FIXTURE_COUNT).map(|i| fixture_task(i, anchor)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 15, 45, 0).unwrap()
    }

    #[test]
    fn test_fixture_shape() {
        let tasks = fixture_tasks(anchor());
        assert_eq!(tasks.len(), 15);

        let first = &tasks[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.title, "Task 1: Implement feature 1");
        assert_eq!(first.assignee_id, None);
        assert_eq!(first.deadline, None);
        assert_eq!(first.status, TaskStatus::Pending);
        assert_eq!(first.created_at, anchor() - Duration::days(15));
        assert_eq!(first.updated_at, first.created_at);
    }

    #[test]
    fn test_fixture_cycles() {
        let tasks = fixture_tasks(anchor());

        let second = &tasks[1];
        assert_eq!(second.assignee_id.as_deref(), Some("user_2"));
        assert_eq!(second.status, TaskStatus::InProgress);
        assert_eq!(second.updated_at, second.created_at + Duration::days(1));

        assert_eq!(tasks[5].assignee_id, None);
        assert_eq!(tasks[8].deadline, None);
        assert_eq!(tasks[14].status, TaskStatus::Completed);
    }

    #[test]
    fn test_deadlines_are_midnight() {
        let task = fixture_task(3, anchor());
        let deadline = task.deadline.unwrap();

        assert_eq!(deadline.hour(), 0);
        assert_eq!(deadline.minute(), 0);
        assert_eq!(
            deadline.date_naive(),
            (task.updated_at + Duration::days(6)).date_naive()
        );
    }

    #[test]
    fn test_fixtures_are_deterministic() {
        assert_eq!(fixture_tasks(anchor()), fixture_tasks(anchor()));
    }
}
