//! HTTP server with Axum
//!
//! Serves the editor's static assets and the JSON endpoints it calls:
//! image upload, project save, index sync and project listing.

pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::services::image_uploader::ImageUploader;
use crate::services::project_index_service::ProjectIndexService;
use crate::services::project_store::{FsProjectStore, ProjectStore};
use crate::utils::config::Config;
use crate::utils::error::Result;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub index: Arc<ProjectIndexService>,
    pub uploader: ImageUploader,
}

impl AppState {
    /// State over an arbitrary store; directories still come from `config`
    pub fn new(config: Arc<Config>, store: Arc<dyn ProjectStore>) -> Result<Self> {
        let paths = config.paths();
        let index = ProjectIndexService::for_paths(store.clone(), &paths, config.owner_name.as_deref())?;

        Ok(Self {
            config,
            index: Arc::new(index),
            uploader: ImageUploader::new(store),
        })
    }

    /// State backed by the filesystem directories of `config`
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let store = Arc::new(FsProjectStore::new(config.paths()));
        Self::new(config, store)
    }
}

pub fn create_router(state: AppState) -> Router {
    let editor_root = state.config.paths().editor_root;
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::redirect_to_editor))
        .route("/api/upload", post(handlers::upload_image))
        .route("/api/save", post(handlers::save_project))
        .route("/api/sync", post(handlers::sync_projects))
        .route("/api/projects", get(handlers::list_projects))
        .fallback_service(ServeDir::new(editor_root))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl+C
pub async fn run_server(config: Arc<Config>) -> anyhow::Result<()> {
    let bind_addr = config.bind;
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Editor available at http://{}/", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}
