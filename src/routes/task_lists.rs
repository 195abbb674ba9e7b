use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskListInput, TaskListUpdate, TaskQuery},
    services::TaskListService,
};

/// Creates a new task list.
///
/// ## Responses:
/// - `201 Created`: the new `TaskList`.
/// - `422 Unprocessable Entity`: the name is empty, blank or longer than 100 characters.
#[post("")]
pub async fn create_list(
    service: web::Data<TaskListService>,
    payload: web::Json<TaskListInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    log::debug!("{} creates a task list", user.username());
    let list = service.create_list(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(list))
}

/// Returns every task list in creation order.
#[get("/get_all")]
pub async fn get_all_lists(
    service: web::Data<TaskListService>,
) -> Result<impl Responder, AppError> {
    let lists = service.get_all_lists().await?;
    Ok(HttpResponse::Ok().json(lists))
}

#[get("/{list_id}")]
pub async fn get_list(
    service: web::Data<TaskListService>,
    list_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let list = service.get_list(list_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Renames a task list. An absent `name` leaves the list unchanged.
///
/// ## Responses:
/// - `200 OK`: the updated `TaskList`.
/// - `404 Not Found`: no list with that id.
/// - `422 Unprocessable Entity`: invalid name or non-positive id.
#[put("/{list_id}")]
pub async fn update_list(
    service: web::Data<TaskListService>,
    list_id: web::Path<i32>,
    payload: web::Json<TaskListUpdate>,
) -> Result<impl Responder, AppError> {
    let list = service
        .update_list(list_id.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Deletes a task list and every task in it.
#[delete("/{list_id}")]
pub async fn delete_list(
    service: web::Data<TaskListService>,
    list_id: web::Path<i32>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let list_id = list_id.into_inner();
    service.delete_list(list_id).await?;
    log::debug!("{} deleted task list {}", user.username(), list_id);
    Ok(HttpResponse::Ok().json(json!({ "message": "List deleted" })))
}

/// Tasks of a list, optionally filtered, with the completion percentage of the result.
///
/// ## Query Parameters:
/// - `status` (optional): `pending`, `in_progress` or `done`.
/// - `priority` (optional): `low`, `medium` or `high`.
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [...], "completion": "<n>%"}`.
/// - `404 Not Found`: no list with that id.
/// - `422 Unprocessable Entity`: unknown status or priority value.
#[get("/{list_id}/tasks")]
pub async fn list_tasks_with_filters(
    service: web::Data<TaskListService>,
    list_id: web::Path<i32>,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let response = service
        .list_tasks_with_completion(list_id.into_inner(), query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
