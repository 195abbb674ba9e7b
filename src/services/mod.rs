//! Use cases: list lifecycle, task lifecycle, and account management.
//!
//! Services validate input, check that referenced entities exist, and delegate
//! storage to the repository traits. Errors are returned to the caller as-is.

pub mod auth;
pub mod task_lists;
pub mod tasks;

pub use auth::AuthService;
pub use task_lists::TaskListService;
pub use tasks::TaskService;

use crate::error::{AppError, AppResult};

/// Storage-generated ids are always positive.
pub(crate) fn ensure_positive_id(kind: &str, id: i32) -> AppResult<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "{} id must be a positive integer, got {}",
            kind, id
        )))
    }
}
