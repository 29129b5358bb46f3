use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{
    handle_calculate, handle_health, handle_list_drawings, handle_root, handle_save_drawing,
    AppState,
};

pub struct AppServer {
    pub addr: SocketAddr,
    pub state: AppState,
    pub body_limit: usize,
}

impl AppServer {
    pub fn new(addr: SocketAddr, state: AppState, body_limit: usize) -> Self {
        Self {
            addr,
            state,
            body_limit,
        }
    }

    pub async fn start(&self) -> Result<(), axum::Error> {
        let app = build_router(self.state.clone(), self.body_limit);

        info!(addr = %self.addr, "listening");
        axum::Server::bind(&self.addr)
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(axum::Error::new)
    }
}

pub fn build_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/calculate", post(handle_calculate))
        .route(
            "/drawings",
            get(handle_list_drawings).post(handle_save_drawing),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
