//! # Careslot API
//!
//! The API crate provides the web server for the careslot booking service:
//! registration and phone verification, slot browsing, interactive booking,
//! schedule views, and the JSON CRUD API over slots, providers and bookings.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like authentication and
//!   error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state accessible to all request handlers.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Server configuration (the handlers need the token secret)
    pub config: config::ApiConfig,
}

/// Builds the application router. Separate from [`start_server`] so tests
/// can drive the router without binding a socket.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Registration, login and phone verification
        .merge(routes::auth::routes())
        // Browse pages (JSON view models)
        .merge(routes::pages::routes())
        // Interactive booking and schedule views
        .merge(routes::booking::routes())
        // JSON CRUD API over slots, providers and bookings
        .merge(routes::api::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database
/// connection: initializes logging, builds the router, applies CORS and
/// timeout layers, and serves until shutdown.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let request_timeout = config.request_timeout;
    let cors_origins = config.cors_origins.clone();
    let addr = config.server_addr();

    // Create shared state with dependencies
    let state = Arc::new(ApiState { db_pool, config });

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &cors_origins {
        let origins = origins
            .iter()
            .filter_map(|origin| origin.parse::<axum::http::HeaderValue>().ok())
            .collect::<Vec<_>>();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(
                |_: tower::BoxError| async {
                    axum::http::StatusCode::REQUEST_TIMEOUT
                },
            ))
            .timeout(std::time::Duration::from_secs(request_timeout)),
    );

    // Start the HTTP server
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
