use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{TaskListRepository, TaskRepository, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::{Task, TaskInput, TaskList, TaskQuery, TaskStatus, TaskUpdate, User};

#[derive(Debug, Default)]
struct MemoryState {
    next_list_id: i32,
    next_task_id: i32,
    next_user_id: i32,
    lists: BTreeMap<i32, TaskList>,
    tasks: BTreeMap<i32, Task>,
    users: BTreeMap<i32, User>,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Gateway kept entirely in memory. Ids start at 1 and are never reused,
/// and `BTreeMap`s keep iteration in creation order.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskListRepository for InMemoryRepository {
    async fn create_list(&self, name: &str) -> AppResult<TaskList> {
        let mut state = self.state.write().await;
        let list = TaskList {
            id: next_id(&mut state.next_list_id),
            name: name.to_string(),
        };
        state.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn get_list(&self, list_id: i32) -> AppResult<Option<TaskList>> {
        Ok(self.state.read().await.lists.get(&list_id).cloned())
    }

    async fn get_all_lists(&self) -> AppResult<Vec<TaskList>> {
        Ok(self.state.read().await.lists.values().cloned().collect())
    }

    async fn update_list(&self, list_id: i32, name: &str) -> AppResult<Option<TaskList>> {
        let mut state = self.state.write().await;
        Ok(state.lists.get_mut(&list_id).map(|list| {
            list.name = name.to_string();
            list.clone()
        }))
    }

    async fn delete_list(&self, list_id: i32) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.lists.remove(&list_id).is_none() {
            return Ok(false);
        }
        state.tasks.retain(|_, task| task.list_id != list_id);
        Ok(true)
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn create_task(&self, list_id: i32, input: &TaskInput) -> AppResult<Task> {
        let mut state = self.state.write().await;
        if !state.lists.contains_key(&list_id) {
            return Err(AppError::NotFound(format!(
                "Task list {} not found",
                list_id
            )));
        }
        let task = Task {
            id: next_id(&mut state.next_task_id),
            title: input.title.clone(),
            description: input.description.clone(),
            status: input.status,
            priority: input.priority,
            list_id,
        };
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, task_id: i32) -> AppResult<Option<Task>> {
        Ok(self.state.read().await.tasks.get(&task_id).cloned())
    }

    async fn update_task(&self, task_id: i32, changes: &TaskUpdate) -> AppResult<Option<Task>> {
        let mut state = self.state.write().await;
        Ok(state.tasks.get_mut(&task_id).map(|task| {
            changes.apply_to(task);
            task.clone()
        }))
    }

    async fn update_task_status(
        &self,
        task_id: i32,
        status: TaskStatus,
    ) -> AppResult<Option<Task>> {
        let mut state = self.state.write().await;
        Ok(state.tasks.get_mut(&task_id).map(|task| {
            task.status = status;
            task.clone()
        }))
    }

    async fn delete_task(&self, task_id: i32) -> AppResult<bool> {
        Ok(self.state.write().await.tasks.remove(&task_id).is_some())
    }

    async fn get_tasks_by_list(&self, list_id: i32, filter: &TaskQuery) -> AppResult<Vec<Task>> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.list_id == list_id && filter.matches(task))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|user| user.username == username) {
            return Err(AppError::Conflict("User already exists".into()));
        }
        let user = User {
            id: next_id(&mut state.next_user_id),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}
