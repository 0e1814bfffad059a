use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use ak_api::app::create_app;
use ak_api::routes::auth::AppState;
use ak_core::services::{
    AuthService, AuthServiceConfig, PasswordHasher, RequestGate, SessionSweeper, SweeperConfig,
    TokenService, TokenServiceConfig,
};
use ak_infra::database::{DatabasePool, MySqlSessionRepository, MySqlUserRepository};
use ak_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;

    // RUST_LOG wins over the environment default
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.logging.level));

    info!("Starting AuthKeep API Server ({})", config.environment);

    let db = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        db.run_migrations()
            .await
            .context("failed to run database migrations")?;
    }
    db.health_check()
        .await
        .context("database is not answering queries")?;
    info!("Database pool ready: {}", db.get_statistics());

    let user_repository = Arc::new(MySqlUserRepository::new(db.get_pool().clone()));
    let session_repository = Arc::new(MySqlSessionRepository::new(db.get_pool().clone()));

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(
        &config.auth.jwt,
    )));
    let gate = RequestGate::new(token_service.clone());

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        session_repository.clone(),
        token_service,
        PasswordHasher::new(config.auth.bcrypt_cost),
        AuthServiceConfig::from(&config.auth.session),
    ));

    let sweeper = Arc::new(SessionSweeper::new(
        session_repository,
        SweeperConfig::from(&config.auth.session),
    ));
    let sweeper_handle = sweeper.start();

    let app_state = web::Data::new(AppState::new(auth_service));
    let gate = web::Data::new(gate);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), gate.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }
    db.close().await;
    info!("Server stopped");

    Ok(())
}
