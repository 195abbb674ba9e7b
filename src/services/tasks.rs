use std::sync::Arc;

use log::{debug, info};
use validator::Validate;

use super::ensure_positive_id;
use crate::error::{AppError, AppResult};
use crate::models::{Task, TaskInput, TaskStatus, TaskUpdate};
use crate::repository::{TaskListRepository, TaskRepository};

/// Task lifecycle. No status transition graph is enforced.
#[derive(Clone)]
pub struct TaskService {
    lists: Arc<dyn TaskListRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(lists: Arc<dyn TaskListRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { lists, tasks }
    }

    /// Validates `input` and stores it under `list_id`, which must exist.
    pub async fn create_task(&self, list_id: i32, input: TaskInput) -> AppResult<Task> {
        ensure_positive_id("List", list_id)?;
        input.validate()?;

        if self.lists.get_list(list_id).await?.is_none() {
            debug!("refusing task for missing list {}", list_id);
            return Err(AppError::NotFound(format!(
                "Task list {} not found",
                list_id
            )));
        }

        let task = self.tasks.create_task(list_id, &input).await?;
        info!("created task {} in list {}", task.id, list_id);
        Ok(task)
    }

    pub async fn get_task(&self, task_id: i32) -> AppResult<Task> {
        ensure_positive_id("Task", task_id)?;
        self.tasks
            .get_task(task_id)
            .await?
            .ok_or_else(|| task_not_found(task_id))
    }

    /// Applies the provided fields only. With nothing provided the task is returned as is.
    pub async fn update_task(&self, task_id: i32, update: TaskUpdate) -> AppResult<Task> {
        ensure_positive_id("Task", task_id)?;
        update.validate()?;

        if update.is_empty() {
            return self.get_task(task_id).await;
        }

        let task = self
            .tasks
            .update_task(task_id, &update)
            .await?
            .ok_or_else(|| task_not_found(task_id))?;
        info!("updated task {}", task.id);
        Ok(task)
    }

    pub async fn delete_task(&self, task_id: i32) -> AppResult<()> {
        ensure_positive_id("Task", task_id)?;
        if !self.tasks.delete_task(task_id).await? {
            return Err(task_not_found(task_id));
        }
        info!("deleted task {}", task_id);
        Ok(())
    }

    /// Sets the status unconditionally; repeating the call is harmless.
    pub async fn change_status(&self, task_id: i32, new_status: TaskStatus) -> AppResult<Task> {
        ensure_positive_id("Task", task_id)?;
        let task = self
            .tasks
            .update_task_status(task_id, new_status)
            .await?
            .ok_or_else(|| task_not_found(task_id))?;
        info!("task {} is now {:?}", task.id, task.status);
        Ok(task)
    }
}

fn task_not_found(task_id: i32) -> AppError {
    AppError::NotFound(format!("Task {} not found", task_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;
    use crate::repository::InMemoryRepository;
    use pretty_assertions::assert_eq;

    async fn setup() -> (TaskService, i32) {
        let repo = Arc::new(InMemoryRepository::new());
        let list = repo.create_list("Inbox").await.unwrap();
        (TaskService::new(repo.clone(), repo), list.id)
    }

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.into(),
            description: "Some details".into(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
        }
    }

    #[actix_rt::test]
    async fn test_create_task_with_defaults() {
        let (service, list_id) = setup().await;
        let task = service.create_task(list_id, input("Buy milk")).await.unwrap();

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.list_id, list_id);
        assert_eq!(service.get_task(task.id).await.unwrap(), task);
    }

    #[actix_rt::test]
    async fn test_create_task_title_length_boundary() {
        let (service, list_id) = setup().await;

        let ok = service.create_task(list_id, input(&"t".repeat(100))).await;
        assert!(ok.is_ok());

        let too_long = service.create_task(list_id, input(&"t".repeat(101))).await;
        assert!(matches!(too_long, Err(AppError::ValidationError(_))));

        let blank = service.create_task(list_id, input("    ")).await;
        assert!(matches!(blank, Err(AppError::ValidationError(_))));
    }

    #[actix_rt::test]
    async fn test_create_task_in_missing_list() {
        let (service, _) = setup().await;
        let result = service.create_task(404, input("Orphan")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn test_update_task_partial() {
        let (service, list_id) = setup().await;
        let task = service.create_task(list_id, input("Draft")).await.unwrap();

        let updated = service
            .update_task(
                task.id,
                TaskUpdate {
                    priority: Some(TaskPriority::High),
                    ..TaskUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.priority, TaskPriority::High);
        assert_eq!(updated.title, task.title);
        assert_eq!(updated.description, task.description);
        assert_eq!(updated.status, task.status);
    }

    #[actix_rt::test]
    async fn test_update_task_without_fields_is_noop() {
        let (service, list_id) = setup().await;
        let task = service.create_task(list_id, input("Stable")).await.unwrap();

        let same = service
            .update_task(task.id, TaskUpdate::default())
            .await
            .unwrap();
        assert_eq!(same, task);
    }

    #[actix_rt::test]
    async fn test_update_task_rejects_explicit_empty_title() {
        let (service, list_id) = setup().await;
        let task = service.create_task(list_id, input("Keep me")).await.unwrap();

        let result = service
            .update_task(
                task.id,
                TaskUpdate {
                    title: Some(String::new()),
                    ..TaskUpdate::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(service.get_task(task.id).await.unwrap().title, "Keep me");
    }

    #[actix_rt::test]
    async fn test_update_missing_task() {
        let (service, _) = setup().await;
        let result = service
            .update_task(
                77,
                TaskUpdate {
                    title: Some("x".into()),
                    ..TaskUpdate::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = service.update_task(77, TaskUpdate::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn test_change_status_any_to_any_and_idempotent() {
        let (service, list_id) = setup().await;
        let task = service.create_task(list_id, input("Ship")).await.unwrap();

        let first = service.change_status(task.id, TaskStatus::Done).await.unwrap();
        let second = service.change_status(task.id, TaskStatus::Done).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second.status, TaskStatus::Done);

        let back = service
            .change_status(task.id, TaskStatus::Pending)
            .await
            .unwrap();
        assert_eq!(back.status, TaskStatus::Pending);

        let missing = service.change_status(1000, TaskStatus::Done).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn test_delete_task() {
        let (service, list_id) = setup().await;
        let task = service.create_task(list_id, input("Gone")).await.unwrap();

        service.delete_task(task.id).await.unwrap();
        assert!(matches!(
            service.get_task(task.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_task(task.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_task(0).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
