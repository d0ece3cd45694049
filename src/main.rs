use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use classifieds::{
    app,
    services::database::Database,
    utilities::{
        app_state::AppState,
        config::{Config, StorageBackend},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::init().await?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.tracing_level.as_str().to_lowercase())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = match config.storage_backend {
        StorageBackend::Postgres => {
            let database = Database::new(&config).await?;
            AppState::postgres(&database)
        }
        StorageBackend::Memory => AppState::in_memory(),
    };
    info!(backend = %config.storage_backend, "storage ready");

    let listener = TcpListener::bind(&config.server_addres)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addres))?;
    info!("Listening on {}", config.server_addres);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
