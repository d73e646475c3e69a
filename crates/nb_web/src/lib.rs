use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/news", get(handlers::get_news))
        .route("/summarize", post(handlers::summarize))
        .route("/categories", get(handlers::list_categories))
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    // The browser client calls the /api/* paths.
    Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(app: Router, addr: SocketAddr) -> nb_core::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

pub mod prelude {
    pub use crate::{create_app, serve, ApiError, AppState};
    pub use nb_core::{Article, Error, Result};
}
