use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;

use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{StatusChange, TaskInput, TaskUpdate},
    services::TaskService,
};

/// Creates a task inside a list.
///
/// ## Request Body:
/// - `title`: 1 to 100 characters, not only whitespace.
/// - `description`: 1 to 500 characters.
/// - `status` (optional): defaults to `pending`.
/// - `priority` (optional): defaults to `medium`.
///
/// ## Responses:
/// - `201 Created`: the new `Task`.
/// - `404 Not Found`: the list does not exist.
/// - `422 Unprocessable Entity`: title or description out of bounds.
#[post("/{list_id}/tasks")]
pub async fn create_task(
    service: web::Data<TaskService>,
    list_id: web::Path<i32>,
    payload: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = service
        .create_task(list_id.into_inner(), payload.into_inner())
        .await?;
    log::debug!("{} created task {}", user.username(), task.id);
    Ok(HttpResponse::Created().json(task))
}

#[get("/tasks/{task_id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task = service.get_task(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task. Fields missing from the body (or `null`) keep their value.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `404 Not Found`: no task with that id.
/// - `422 Unprocessable Entity`: a provided field is invalid, including `""`.
#[put("/tasks/{task_id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
    payload: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let task = service
        .update_task(task_id.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Sets the status of a task from the `new_status` query parameter.
#[patch("/tasks/{task_id}/status")]
pub async fn change_task_status(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
    query: web::Query<StatusChange>,
) -> Result<impl Responder, AppError> {
    let task = service
        .change_status(task_id.into_inner(), query.new_status)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

#[delete("/tasks/{task_id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    service.delete_task(task_id).await?;
    log::debug!("{} deleted task {}", user.username(), task_id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted" })))
}
