//! Server binary: reads config from the environment, prepares the database, serves the API.

use stockroom::{
    apply_migrations, build_router, ensure_database_exists, seed_demo, AppConfig, AppError, AppState, MemoryStore,
    PgStore,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stockroom=info,tower_http=info")),
        )
        .init();

    let state = if config.in_memory {
        tracing::info!("serving from the in-memory store with demo data");
        AppState::new(MemoryStore::with_demo_data()?)
    } else {
        AppState::new(connect_postgres(&config).await?)
    };
    let app = build_router(state, &config)?;

    let listener = TcpListener::bind(config.socket_addr()?).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn connect_postgres(config: &AppConfig) -> Result<PgStore, AppError> {
    let connect = config.connect_options()?;
    if let Err(e) = ensure_database_exists(&connect).await {
        // Managed databases often refuse CREATE DATABASE; the pool connect below reports the real problem.
        tracing::warn!(error = %e, "could not verify database exists");
    }
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "error connecting to the database");
            AppError::Db(e)
        })?;
    tracing::info!("connected to the database");

    if config.auto_migrate {
        apply_migrations(&pool).await?;
    }
    if config.seed_demo {
        seed_demo(&pool).await?;
    }
    Ok(PgStore::new(pool))
}
