use std::sync::Arc;

use log::{debug, info};
use validator::Validate;

use super::ensure_positive_id;
use crate::error::{AppError, AppResult};
use crate::models::{TaskList, TaskListFilteredResponse, TaskListInput, TaskListUpdate, TaskQuery};
use crate::repository::{TaskListRepository, TaskRepository};

/// List lifecycle and the filtered completion query.
#[derive(Clone)]
pub struct TaskListService {
    lists: Arc<dyn TaskListRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl TaskListService {
    pub fn new(lists: Arc<dyn TaskListRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { lists, tasks }
    }

    pub async fn create_list(&self, input: TaskListInput) -> AppResult<TaskList> {
        input.validate()?;
        let list = self.lists.create_list(&input.name).await?;
        info!("created task list {} ({:?})", list.id, list.name);
        Ok(list)
    }

    pub async fn get_list(&self, list_id: i32) -> AppResult<TaskList> {
        ensure_positive_id("List", list_id)?;
        self.lists.get_list(list_id).await?.ok_or_else(|| {
            debug!("task list {} not found", list_id);
            list_not_found(list_id)
        })
    }

    pub async fn get_all_lists(&self) -> AppResult<Vec<TaskList>> {
        self.lists.get_all_lists().await
    }

    /// Renames the list when `name` is provided; otherwise returns it unchanged.
    pub async fn update_list(&self, list_id: i32, update: TaskListUpdate) -> AppResult<TaskList> {
        ensure_positive_id("List", list_id)?;
        update.validate()?;

        let current = self.get_list(list_id).await?;
        let Some(name) = update.name else {
            return Ok(current);
        };

        let list = self
            .lists
            .update_list(list_id, &name)
            .await?
            .ok_or_else(|| list_not_found(list_id))?;
        info!("renamed task list {} to {:?}", list.id, list.name);
        Ok(list)
    }

    /// Deletes the list together with its tasks. A missing list is `NotFound`.
    pub async fn delete_list(&self, list_id: i32) -> AppResult<()> {
        ensure_positive_id("List", list_id)?;
        if !self.lists.delete_list(list_id).await? {
            return Err(list_not_found(list_id));
        }
        info!("deleted task list {} and its tasks", list_id);
        Ok(())
    }

    /// Tasks of the list matching `filter`, with the done percentage of that filtered set.
    pub async fn list_tasks_with_completion(
        &self,
        list_id: i32,
        filter: TaskQuery,
    ) -> AppResult<TaskListFilteredResponse> {
        self.get_list(list_id).await?;
        let tasks = self.tasks.get_tasks_by_list(list_id, &filter).await?;
        Ok(TaskListFilteredResponse::new(tasks))
    }
}

fn list_not_found(list_id: i32) -> AppError {
    AppError::NotFound(format!("Task list {} not found", list_id))
}
