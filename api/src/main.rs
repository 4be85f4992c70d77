// Asset inventory API server entry point

use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

use http::{header, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_api::config::ApiConfig;
use inventory_api::db::DbPool;
use inventory_api::services::user_service;
use inventory_api::{create_router, AppContext};
use inventory_database::migration::{Migrator, MigratorTrait};

fn load_env() {
    dotenv::dotenv().ok();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    load_env();
    // Configure logging with tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load API configuration from environment
    let config = ApiConfig::from_env();
    tracing::info!("Configuration loaded");

    // Establish database connection pool
    let db_pool = DbPool::new(&config).await.inspect_err(|e| {
        tracing::error!("Failed to connect to database: {}", e);
    })?;
    tracing::info!("Connected to database");

    if config.run_migrations {
        Migrator::up(db_pool.get_connection(), None).await?;
        tracing::info!("Migrations applied");
    }

    let addr: SocketAddr = config.server_addr().parse()?;
    let app_state = AppContext::new(db_pool.repositories(), config);

    if let Some(admin) = user_service::bootstrap_admin(&app_state).await? {
        tracing::info!("Bootstrapped admin account {}", admin.username);
    }

    // Configure CORS policy
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::AUTHORIZATION,
        ])
        .expose_headers([
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::CONTENT_DISPOSITION,
            header::LOCATION,
        ])
        .max_age(Duration::from_secs(3600));

    let app = create_router(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start HTTP server
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
