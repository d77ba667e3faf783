//! API server. Builds the router and serves it until Ctrl+C.

use crate::adapters::http::handlers::{
    AppState, budget_summary, generate, health, nlu, spending_insights,
};
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ApiServer {
    host: String,
    port: u16,
    state: AppState,
}

impl ApiServer {
    pub fn new(host: String, port: u16, state: AppState) -> Self {
        Self { host, port, state }
    }

    /// Routes with state and middleware attached. Exposed for in-process tests.
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Bind and serve. Returns after a graceful shutdown on Ctrl+C.
    pub async fn start(&self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(address = %listener.local_addr()?, "finchat API listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/budget-summary", post(budget_summary))
        .route("/spending-insights", post(spending_insights))
        .route("/nlu", post(nlu))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Ctrl+C received, shutting down");
    }
}
