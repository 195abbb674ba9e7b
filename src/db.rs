//! Connection pool and schema bootstrap.
//!
//! The schema is created if missing when the server starts; there is no
//! versioned migration history.

use log::info;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::error::AppResult;

const SCHEMA: &[&str] = &[
    "DO $$ BEGIN
        CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'done');
     EXCEPTION WHEN duplicate_object THEN NULL;
     END $$",
    "DO $$ BEGIN
        CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
     EXCEPTION WHEN duplicate_object THEN NULL;
     END $$",
    "CREATE TABLE IF NOT EXISTS task_lists (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL
     )",
    "CREATE TABLE IF NOT EXISTS tasks (
        id SERIAL PRIMARY KEY,
        title VARCHAR(100) NOT NULL,
        description VARCHAR(500) NOT NULL,
        status task_status NOT NULL DEFAULT 'pending',
        priority task_priority NOT NULL DEFAULT 'medium',
        list_id INTEGER NOT NULL REFERENCES task_lists(id) ON DELETE CASCADE
     )",
    "CREATE INDEX IF NOT EXISTS idx_tasks_list_id ON tasks (list_id)",
    "CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(20) NOT NULL UNIQUE,
        password_hash VARCHAR(500) NOT NULL
     )",
];

pub async fn connect(config: &Config) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Creates the enum types, tables and indexes that do not exist yet.
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!("database schema ready");
    Ok(())
}
