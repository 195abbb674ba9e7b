#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "Task lists and tasks behind authenticated HTTP endpoints: domain models,"]
#![doc = "the persistence gateway, the use cases, authentication, and routing."]
#![doc = "The binary (`main.rs`) loads configuration, connects to PostgreSQL and serves the app."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
