//! Persistence gateway.
//!
//! The use cases only see these traits. `PgRepository` backs them with PostgreSQL,
//! `InMemoryRepository` with process memory for tests and local experiments.
//! Every method is a single unit of work: it either fully applies or fails
//! without leaving partial state behind.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Task, TaskInput, TaskList, TaskQuery, TaskStatus, TaskUpdate, User};

pub use memory::InMemoryRepository;
pub use postgres::PgRepository;

#[async_trait]
pub trait TaskListRepository: Send + Sync {
    async fn create_list(&self, name: &str) -> AppResult<TaskList>;

    async fn get_list(&self, list_id: i32) -> AppResult<Option<TaskList>>;

    /// All lists in creation order.
    async fn get_all_lists(&self) -> AppResult<Vec<TaskList>>;

    /// Returns `None` when the list does not exist.
    async fn update_list(&self, list_id: i32, name: &str) -> AppResult<Option<TaskList>>;

    /// Deletes the list and all of its tasks. Returns `false` when nothing was deleted.
    async fn delete_list(&self, list_id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Fails with `NotFound` if `list_id` does not reference a live list.
    async fn create_task(&self, list_id: i32, input: &TaskInput) -> AppResult<Task>;

    async fn get_task(&self, task_id: i32) -> AppResult<Option<Task>>;

    /// Applies only the fields present in `changes`.
    async fn update_task(&self, task_id: i32, changes: &TaskUpdate) -> AppResult<Option<Task>>;

    async fn update_task_status(&self, task_id: i32, status: TaskStatus)
        -> AppResult<Option<Task>>;

    async fn delete_task(&self, task_id: i32) -> AppResult<bool>;

    /// Tasks of `list_id` matching `filter`, in creation order.
    async fn get_tasks_by_list(&self, list_id: i32, filter: &TaskQuery) -> AppResult<Vec<Task>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` if the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User>;

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;
}
