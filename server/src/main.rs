//! Job Search Proxy Server
//!
//! Serves the search form and proxies searches to the USAJOBS API.

use std::net::SocketAddr;
use std::sync::Arc;

use job_search_proxy::{AppState, Config, UpstreamClient, logging, router};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logging::init();
    info!("🚀 Starting Job Search Proxy...");

    let config = Config::load()?;
    info!("🔗 Upstream: {}", config.upstream_base_url);

    let upstream = UpstreamClient::new(&config)?;
    let state = Arc::new(AppState::new(&config, upstream));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Now Listening on Port {}", config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
