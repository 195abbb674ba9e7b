use std::sync::Arc;

use actix_web::web;

use crate::auth::JwtConfig;
use crate::repository::{TaskListRepository, TaskRepository, UserRepository};
use crate::routes;
use crate::services::{AuthService, TaskListService, TaskService};

/// Services shared by every worker, wrapped for actix-web extraction.
#[derive(Clone)]
pub struct AppState {
    pub lists: web::Data<TaskListService>,
    pub tasks: web::Data<TaskService>,
    pub auth: web::Data<AuthService>,
    pub jwt: web::Data<JwtConfig>,
}

impl AppState {
    /// Wires all services to one storage backend.
    pub fn new<R>(repo: Arc<R>, jwt: JwtConfig, bcrypt_cost: u32) -> Self
    where
        R: TaskListRepository + TaskRepository + UserRepository + 'static,
    {
        Self {
            lists: web::Data::new(TaskListService::new(repo.clone(), repo.clone())),
            tasks: web::Data::new(TaskService::new(repo.clone(), repo.clone())),
            auth: web::Data::new(AuthService::new(repo, jwt.clone(), bcrypt_cost)),
            jwt: web::Data::new(jwt),
        }
    }

    /// Registers the shared data and all routes. Use with `App::configure`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.lists.clone())
            .app_data(self.tasks.clone())
            .app_data(self.auth.clone())
            .app_data(self.jwt.clone());
        routes::config(cfg);
    }
}
