use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use wall_robot::adapters::inbound::{build_router, AppState};
use wall_robot::adapters::outbound::{
    init_combined_logger, FileTrajectoryStore, InMemoryTrajectoryStore, PostgresTrajectoryStore,
};
use wall_robot::application::CoverageService;
use wall_robot::config::StorageBackend;
use wall_robot::domains::coverage::{CoveragePlanner, TrajectoryStore};
use wall_robot::domains::logger::parse_level;
use wall_robot::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::var("WALL_ROBOT_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::load(&config_path).with_context(|| format!("loading {}", config_path))?;

    // fast_log owns the `log` facade, so tracing is installed without its log bridge
    let logger = init_combined_logger(&config.logging.file, parse_level(&config.logging.level));
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "wall_robot=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;

    info!("Starting wall-robot");
    info!("Storage backend: {:?}", config.storage.backend);

    let store: Arc<dyn TrajectoryStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryTrajectoryStore::new()),
        StorageBackend::File => Arc::new(FileTrajectoryStore::open(&config.storage.file_path).await?),
        StorageBackend::Postgres => {
            info!("PostgreSQL host: {}", config.postgres.host);
            Arc::new(PostgresTrajectoryStore::connect(config.postgres.clone()).await?)
        }
    };

    let planner = CoveragePlanner::new(config.planner.step)?;
    let service = Arc::new(CoverageService::new(planner, store, logger.clone()));
    let state = AppState::new(service, logger.clone(), config.server.static_dir.clone());
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Listening on http://{}", addr);
    logger.info(&format!("wall-robot listening on {}", addr));

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Shutting down wall-robot");
    Ok(())
}
