use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::task::{validate_not_blank, Task, TaskStatus};

/// A named container of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TaskList {
    pub id: i32,
    pub name: String,
}

/// Payload for creating a list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskListInput {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: String,
}

/// Partial update of a list; an absent `name` leaves it unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskListUpdate {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    #[serde(default)]
    pub name: Option<String>,
}

/// Tasks of one list, after filtering, with the share of them that is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListFilteredResponse {
    pub tasks: Vec<Task>,
    /// Whole percentage rounded down, e.g. `"33%"`.
    pub completion: String,
}

impl TaskListFilteredResponse {
    pub fn new(tasks: Vec<Task>) -> Self {
        let completion = format!("{}%", completion_percentage(&tasks));
        Self { tasks, completion }
    }
}

/// `floor(100 * done / total)`, or 0 for an empty slice.
pub fn completion_percentage(tasks: &[Task]) -> usize {
    if tasks.is_empty() {
        return 0;
    }
    let done = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Done)
        .count();
    done * 100 / tasks.len()
}
