//! The browser page and its assets.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::assets::{content_type_for, AssetLoader};
use crate::error::ApiError;

fn serve_asset(assets: &AssetLoader, path: &str) -> Result<Response, ApiError> {
    let data = assets.read_static(path).map_err(|e| {
        tracing::debug!(path, error = %e, "Asset not found");
        ApiError::NotFound
    })?;
    Ok(([(header::CONTENT_TYPE, content_type_for(path))], data.into_owned()).into_response())
}

/// Serve the converter page
pub async fn handle_index(State(assets): State<Arc<AssetLoader>>) -> Result<Response, ApiError> {
    serve_asset(&assets, "index.html")
}

/// Serve a page asset from `static/`
pub async fn handle_static(
    State(assets): State<Arc<AssetLoader>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    serve_asset(&assets, &path)
}
