//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::models::AppConfig;
use crate::services::{
    ArtService, FileSessionStore, ImageCache, InMemorySessionStore, SessionStore,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assets: Arc<AssetLoader>,
    pub art: Arc<ArtService>,
    pub images: Arc<ImageCache>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<AssetLoader> {
    fn from_ref(state: &AppState) -> Self {
        state.assets.clone()
    }
}

impl FromRef<AppState> for Arc<ArtService> {
    fn from_ref(state: &AppState) -> Self {
        state.art.clone()
    }
}

/// Directory for snapshot files: `SESSION_DIR` wins over `session.dir`
fn session_dir(config: &AppConfig) -> Option<PathBuf> {
    std::env::var("SESSION_DIR")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| config.session.dir.clone())
}

/// Create application state from an asset loader.
///
/// Snapshots go to disk when a session directory is configured and stay in
/// memory otherwise.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);

    let store: Arc<dyn SessionStore> = match session_dir(&config) {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                anyhow::anyhow!("Failed to create session directory {}: {e}", dir.display())
            })?;
            tracing::info!(dir = %dir.display(), "Persisting session snapshots to disk");
            Arc::new(FileSessionStore::new(dir))
        }
        None => {
            tracing::info!("Keeping session snapshots in memory");
            Arc::new(InMemorySessionStore::with_capacity(
                config.session.max_sessions,
            ))
        }
    };

    Ok(create_app_state_with_store(asset_loader, config, store))
}

/// Create application state around an explicit snapshot store.
pub fn create_app_state_with_store(
    asset_loader: Arc<AssetLoader>,
    config: AppConfig,
    store: Arc<dyn SessionStore>,
) -> AppState {
    let images = Arc::new(ImageCache::with_limits(
        config.session.cached_images,
        config.session.image_ttl(),
    ));
    let art = Arc::new(ArtService::new(store, images.clone()));

    AppState {
        config: Arc::new(config),
        assets: asset_loader,
        art,
        images,
    }
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. API
/// responses depend on the session, so they are marked uncacheable.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_bytes;

    let api = Router::new()
        .route(
            "/api/image",
            get(api::handle_get_image)
                .post(api::handle_upload)
                .delete(api::handle_clear_image),
        )
        .route("/api/render", get(api::handle_render))
        .route("/api/render.txt", get(api::handle_render_text))
        .route("/api/palettes", get(api::handle_palettes))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        // Browser page
        .route("/", get(api::handle_index))
        .route("/static/*path", get(api::handle_static))
        .merge(api)
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
