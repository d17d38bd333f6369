use std::net::SocketAddr;
use altis_api::{app, bootstrap, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bootstrap::init_tracing("altis_api=debug,altis_core=debug,altis_store=debug,tower_http=debug,axum::rejection=trace");

    let config = altis_store::Config::load()?;
    tracing::info!("Starting Altis booking API on port {}", config.server.port);

    let engine = bootstrap::load_engine(&config).await?;
    let app = app(AppState::new(engine));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
