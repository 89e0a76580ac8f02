//! Pustaka Main Service
//!
//! Manages the book catalog and the borrow/return transactions. Trusts
//! session tokens issued by the auth service with the shared secret.

use axum::{
    routing::{delete, get, post, put},
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
    repository::Repository,
    services::MainServices,
    MainState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load("main-service").expect("Failed to load configuration");

    // Initialize tracing
    pustaka_server::init_tracing(&config.logging);

    tracing::info!("Starting Pustaka Main Service v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations/main")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = MainServices::new(repository);

    // Create application state
    let state = MainState {
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

    tracing::info!("Main service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the main service router with all routes
fn create_router(state: MainState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Catalog
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::upsert_book))
        .route("/books/:id", put(api::books::update_book))
        .route("/books/:id", post(api::books::update_book))
        .route("/books/:id", delete(api::books::delete_book))
        // Borrowings
        .route("/borrow", post(api::borrowings::borrow))
        .route("/return", post(api::borrowings::return_loan))
        .route("/borrowings/all", get(api::borrowings::list_borrowings))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(api::openapi::main_docs_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
