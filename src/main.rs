//! LocalLib Server - Library Catalog
//!
//! A Rust web server for a local library catalog.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use locallib_server::{
    api, config::AppConfig, repository::Repository, services::Services, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("locallib_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LocalLib Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool.clone());
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
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

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Explicit teardown of the shared store handle
    pool.close().await;
    tracing::info!("Database connection closed, shutting down");

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Catalog routes
    let catalog = Router::new()
        // Book instances
        .route(
            "/bookinstances",
            get(api::book_instances::list_book_instances),
        )
        .route(
            "/bookinstance/create",
            get(api::book_instances::create_book_instance_form)
                .post(api::book_instances::create_book_instance),
        )
        .route(
            "/bookinstance/:id",
            get(api::book_instances::get_book_instance),
        )
        .route(
            "/bookinstance/:id/update",
            get(api::book_instances::update_book_instance_form)
                .post(api::book_instances::update_book_instance),
        )
        .route(
            "/bookinstance/:id/delete",
            get(api::book_instances::delete_book_instance_form)
                .post(api::book_instances::delete_book_instance),
        )
        // Authors
        .route("/authors", get(api::authors::list_authors))
        .route(
            "/author/create",
            get(api::authors::create_author_form).post(api::authors::create_author),
        )
        .route("/author/:id", get(api::authors::get_author))
        .route(
            "/author/:id/delete",
            get(api::authors::delete_author_form).post(api::authors::delete_author),
        )
        // Books
        .route("/books", get(api::books::list_books))
        .route("/book/:id", get(api::books::get_book))
        .with_state(state.clone());

    // Operational routes
    let operational = Router::new()
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/catalog", catalog)
        .merge(operational)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
