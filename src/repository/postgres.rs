use async_trait::async_trait;
use sqlx::PgPool;

use super::{TaskListRepository, TaskRepository, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::{Task, TaskInput, TaskList, TaskQuery, TaskStatus, TaskUpdate, User};

const TASK_COLUMNS: &str = "id, title, description, status, priority, list_id";

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed gateway. Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn has_code(error: &sqlx::Error, code: &str) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some(code),
        _ => false,
    }
}

#[async_trait]
impl TaskListRepository for PgRepository {
    async fn create_list(&self, name: &str) -> AppResult<TaskList> {
        let list = sqlx::query_as::<_, TaskList>(
            "INSERT INTO task_lists (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(list)
    }

    async fn get_list(&self, list_id: i32) -> AppResult<Option<TaskList>> {
        let list = sqlx::query_as::<_, TaskList>("SELECT id, name FROM task_lists WHERE id = $1")
            .bind(list_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(list)
    }

    async fn get_all_lists(&self) -> AppResult<Vec<TaskList>> {
        let lists = sqlx::query_as::<_, TaskList>("SELECT id, name FROM task_lists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(lists)
    }

    async fn update_list(&self, list_id: i32, name: &str) -> AppResult<Option<TaskList>> {
        let list = sqlx::query_as::<_, TaskList>(
            "UPDATE task_lists SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name)
        .bind(list_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(list)
    }

    async fn delete_list(&self, list_id: i32) -> AppResult<bool> {
        // Tasks go first so the cascade also holds on schemas without ON DELETE CASCADE.
        // Dropping `tx` on an early return rolls both statements back.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tasks WHERE list_id = $1")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM task_lists WHERE id = $1")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskRepository for PgRepository {
    async fn create_task(&self, list_id: i32, input: &TaskInput) -> AppResult<Task> {
        let sql = format!(
            "INSERT INTO tasks (title, description, status, priority, list_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            TASK_COLUMNS
        );

        sqlx::query_as::<_, Task>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.priority)
            .bind(list_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if has_code(&e, FOREIGN_KEY_VIOLATION) {
                    AppError::NotFound(format!("Task list {} not found", list_id))
                } else {
                    e.into()
                }
            })
    }

    async fn get_task(&self, task_id: i32) -> AppResult<Option<Task>> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn update_task(&self, task_id: i32, changes: &TaskUpdate) -> AppResult<Option<Task>> {
        // NULL parameters keep the current column value.
        let sql = format!(
            "UPDATE tasks
             SET title = COALESCE($1, title),
                 description = COALESCE($2, description),
                 status = COALESCE($3, status),
                 priority = COALESCE($4, priority)
             WHERE id = $5
             RETURNING {}",
            TASK_COLUMNS
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.status)
            .bind(changes.priority)
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn update_task_status(
        &self,
        task_id: i32,
        status: TaskStatus,
    ) -> AppResult<Option<Task>> {
        let sql = format!(
            "UPDATE tasks SET status = $1 WHERE id = $2 RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(status)
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete_task(&self, task_id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_tasks_by_list(&self, list_id: i32, filter: &TaskQuery) -> AppResult<Vec<Task>> {
        let mut sql = format!("SELECT {} FROM tasks WHERE list_id = $1", TASK_COLUMNS);
        let mut param_count = 2;

        if filter.status.is_some() {
            sql.push_str(&format!(" AND status = ${}", param_count));
            param_count += 1;
        }
        if filter.priority.is_some() {
            sql.push_str(&format!(" AND priority = ${}", param_count));
        }
        sql.push_str(" ORDER BY id");

        let mut query_builder = sqlx::query_as::<_, Task>(&sql).bind(list_id);
        if let Some(status) = filter.status {
            query_builder = query_builder.bind(status);
        }
        if let Some(priority) = filter.priority {
            query_builder = query_builder.bind(priority);
        }

        let tasks = query_builder.fetch_all(&self.pool).await?;
        Ok(tasks)
    }
}

#[async_trait]
impl UserRepository for PgRepository {
    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2)
             RETURNING id, username, password_hash",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if has_code(&e, UNIQUE_VIOLATION) {
                AppError::Conflict("User already exists".into())
            } else {
                e.into()
            }
        })
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
