//! Pustaka Auth Service
//!
//! Handles registration, login and profile management, and issues the
//! signed session tokens the main service verifies.

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use pustaka_server::{
    api,
    config::AppConfig,
    repository::accounts::AccountsRepository,
    services::AuthServices,
    AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load("auth-service").expect("Failed to load configuration");

    // Initialize tracing
    pustaka_server::init_tracing(&config.logging);

    tracing::info!("Starting Pustaka Auth Service v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations/auth")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = AccountsRepository::new(pool);
    let services = AuthServices::new(repository, config.auth.clone());

    // Create application state
    let state = AuthState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Auth service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the auth service router with all routes
fn create_router(state: AuthState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Accounts
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/profile", get(api::auth::get_profile))
        .route("/profile", put(api::auth::update_profile))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(api::openapi::auth_docs_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
