//! Pustaka Library Book Lending System
//!
//! A Rust implementation of the Pustaka lending services: an authentication
//! service issuing signed session tokens and a main service managing the
//! book catalog and borrow/return transactions.

use std::sync::Arc;

use axum::extract::FromRef;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod time;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state for the auth service
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::AuthServices>,
}

/// Application state for the main service
#[derive(Clone)]
pub struct MainState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::MainServices>,
}

impl FromRef<AuthState> for Arc<AppConfig> {
    fn from_ref(state: &AuthState) -> Self {
        state.config.clone()
    }
}

impl FromRef<MainState> for Arc<AppConfig> {
    fn from_ref(state: &MainState) -> Self {
        state.config.clone()
    }
}

/// Initialize tracing for a service binary
pub fn init_tracing(config: &config::LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pustaka_server={},tower_http=debug", config.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
