pub mod health;
pub mod task_lists;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::{extractor_error, json_error, query_error};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| json_error(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| query_error(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _| extractor_error(err)))
        .service(health::health)
        .service(
            web::scope("/users")
                .service(users::register)
                .service(users::login),
        )
        .service(
            web::scope("/tasklists")
                .wrap(AuthMiddleware)
                // Literal segments must be registered before `/{list_id}`.
                .service(task_lists::get_all_lists)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::change_task_status)
                .service(tasks::delete_task)
                .service(task_lists::create_list)
                .service(task_lists::get_list)
                .service(task_lists::update_list)
                .service(task_lists::delete_list)
                .service(task_lists::list_tasks_with_filters)
                .service(tasks::create_task),
        );
}
