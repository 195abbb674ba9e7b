use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Progress of a task. Any status may move to any other.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Currently being worked on.
    InProgress,
    /// Finished; counts towards completion.
    Done,
}

/// Priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Rejects strings made only of whitespace. Length is checked separately.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if !value.trim().is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new("blank"))
    }
}

/// Payload for creating a task inside a list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// 1 to 100 characters, not only whitespace.
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub title: String,

    /// 1 to 500 characters.
    #[validate(length(min = 1, max = 500))]
    pub description: String,

    /// Defaults to `pending`.
    #[serde(default)]
    pub status: TaskStatus,

    /// Defaults to `medium`.
    #[serde(default)]
    pub priority: TaskPriority,
}

/// Partial update of a task.
///
/// A field that is absent (or `null`) in the request is `None` and left untouched.
/// A field that is present is validated and applied, so an explicit `""` is rejected
/// instead of being mistaken for "no change".
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    #[serde(default)]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 500))]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub priority: Option<TaskPriority>,
}

impl TaskUpdate {
    /// True when no field was provided.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    /// Applies the provided fields to `task` in place.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}

/// Body of `PATCH /tasklists/tasks/{id}/status`, taken from the query string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusChange {
    pub new_status: TaskStatus,
}

/// A task as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// The owning list. Never changes after creation.
    pub list_id: i32,
}

/// Exact-match filters for the tasks of one list. Absent fields do not filter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| task.status == status)
            && self.priority.map_or(true, |priority| task.priority == priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, description: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            description: description.to_string(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
        }
    }

    #[test]
    fn test_task_input_title_bounds() {
        assert!(input(&"a".repeat(100), "desc").validate().is_ok());
        assert!(input(&"a".repeat(101), "desc").validate().is_err());
        assert!(input("", "desc").validate().is_err());
        assert!(input("   \t", "desc").validate().is_err());
        assert!(input(" x ", "desc").validate().is_ok());
    }

    #[test]
    fn test_task_input_description_bounds() {
        assert!(input("title", &"d".repeat(500)).validate().is_ok());
        assert!(input("title", &"d".repeat(501)).validate().is_err());
        assert!(input("title", "").validate().is_err());
    }

    #[test]
    fn test_task_input_defaults() {
        let parsed: TaskInput =
            serde_json::from_str(r#"{"title": "Write report", "description": "Q3"}"#).unwrap();
        assert_eq!(parsed.status, TaskStatus::Pending);
        assert_eq!(parsed.priority, TaskPriority::Medium);
    }

    #[test]
    fn test_enums_reject_unknown_values() {
        assert!(serde_json::from_str::<TaskStatus>(r#""archived""#).is_err());
        assert!(serde_json::from_str::<TaskPriority>(r#""urgent""#).is_err());
        assert_eq!(
            serde_json::from_str::<TaskStatus>(r#""in_progress""#).unwrap(),
            TaskStatus::InProgress
        );
    }

    #[test]
    fn test_task_update_distinguishes_absent_from_empty() {
        let absent: TaskUpdate = serde_json::from_str("{}").unwrap();
        assert!(absent.is_empty());
        assert!(absent.validate().is_ok());

        let null: TaskUpdate = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert!(null.is_empty());

        let empty: TaskUpdate = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert_eq!(empty.title.as_deref(), Some(""));
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_task_update_apply_to() {
        let mut task = Task {
            id: 1,
            title: "Old".into(),
            description: "Old description".into(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Low,
            list_id: 7,
        };
        let update = TaskUpdate {
            title: Some("New".into()),
            status: Some(TaskStatus::Done),
            ..TaskUpdate::default()
        };

        update.apply_to(&mut task);

        assert_eq!(task.title, "New");
        assert_eq!(task.description, "Old description");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.priority, TaskPriority::Low);
        assert_eq!(task.list_id, 7);
    }
}
