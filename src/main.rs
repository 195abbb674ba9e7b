use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use env_logger::Env;
use log::{error, info};

use tasktrack::repository::PgRepository;
use tasktrack::{db, AppState, Config};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let pool = db::connect(&config)
        .await
        .map_err(|e| startup_error("failed to connect to database", e))?;
    db::init_schema(&pool)
        .await
        .map_err(|e| startup_error("failed to prepare database schema", e))?;

    let state = AppState::new(
        Arc::new(PgRepository::new(pool)),
        config.jwt.clone(),
        config.bcrypt_cost,
    );

    info!("Starting tasktrack server at {}", config.server_url());
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
