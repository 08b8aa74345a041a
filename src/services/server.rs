use anyhow::{Context, Result};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::api::RankingsClient;
use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::AppConfig;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let source = RankingsClient::new(&self.config.service)?;
        info!("Serving rankings from {}", source.base_url());

        let state = Arc::new(AppState::new(source, self.config.clone()));
        let app = create_router(state).layer(ServiceBuilder::new().layer(CorsLayer::permissive()));

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
