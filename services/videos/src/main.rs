use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use common::database::{DatabaseConfig, init_pool};
use videos::config::ServerConfig;
use videos::routes::create_router;
use videos::service::VideoService;
use videos::state::AppState;
use videos::store::postgres::PgVideoStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    info!("Starting videos service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let service = VideoService::new(Arc::new(PgVideoStore::new(pool)));
    let app = create_router(AppState { service });

    let config = ServerConfig::from_env();
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Videos service listening on {}", config.bind_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
