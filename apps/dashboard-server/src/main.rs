use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use dashboard_api::{build_router, cors_layer, views::spawn_sweeper, AppState};
use dashboard_core::repositories::{ProductRepository, UserRepository};
use dashboard_infrastructure::{HttpProductRepository, HttpUserRepository, RemoteClient};
use dashboard_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    dashboard_shared::telemetry::init_telemetry();

    info!("Dashboard server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Remote Product Service
    info!("Using remote product service at {}", config.remote_base_url());
    let remote = RemoteClient::from_settings(&config.remote)?;
    let users: Arc<dyn UserRepository> = Arc::new(HttpUserRepository::new(remote.clone()));
    let products: Arc<dyn ProductRepository> = Arc::new(HttpProductRepository::new(remote));

    // Create App State
    let state = AppState::new(&config, users, products)?;

    // Idle page views
    let sweep_every = Duration::from_secs(config.dashboard.sweep_interval_secs);
    spawn_sweeper(state.views.clone(), sweep_every);

    // Build router
    let mut app = build_router(state);
    if let Some(cors) = cors_layer(&config.app.allowed_origins) {
        app = app.layer(cors);
    }

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
