// Main entry point for API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use server_core::{
    domains::auth::JwtService,
    kernel::{AesGcmIdentifierCodec, InMemoryOrganizationSelection, LocalImageStorage, ServerDeps},
    server::build_app,
    Config,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting cooperative member registry API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let codec = AesGcmIdentifierCodec::from_hex(&config.member_token_key)
        .context("MEMBER_TOKEN_KEY is not a valid 32-byte hex key")?;

    let deps = ServerDeps::new(
        pool,
        Arc::new(codec),
        Arc::new(LocalImageStorage::new(&config.upload_dir)),
        Arc::new(InMemoryOrganizationSelection::new(Duration::from_secs(
            config.selection_ttl_secs,
        ))),
        Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone())),
    );

    // Build application
    let app = build_app(deps, &config.allowed_origins, config.default_page_size);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
