use ascii_render::{Palette, RenderConfig, Weighting};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::headers::HeaderMapExt;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{ArtService, Rendered};

/// Render settings from the query string
///
/// Every field is optional and taken as text so that a malformed value
/// falls back to the configured default instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RenderQuery {
    /// Output width in columns, clamped to [1, image width]
    pub width: Option<String>,
    /// Palette index (0-6) or name
    pub palette: Option<String>,
    /// `simple` or `perceptual`
    pub weighting: Option<String>,
    /// Font size in points, clamped to [1, 6]
    pub font_size: Option<String>,
}

impl RenderQuery {
    /// Overlay the query onto `defaults`
    pub fn resolve(&self, defaults: RenderConfig) -> RenderConfig {
        let mut config = defaults;

        if let Some(width) = parse_integer("width", self.width.as_deref()) {
            config = config.width(width.clamp(1, u32::MAX as i64) as u32);
        }
        if let Some(raw) = self.palette.as_deref() {
            match Palette::parse(raw) {
                Some(palette) => config = config.palette(palette),
                None => tracing::debug!(value = raw, "Ignoring unknown palette"),
            }
        }
        if let Some(raw) = self.weighting.as_deref() {
            match Weighting::parse(raw) {
                Some(weighting) => config = config.weighting(weighting),
                None => tracing::debug!(value = raw, "Ignoring unknown weighting"),
            }
        }
        if let Some(size) = parse_integer("font_size", self.font_size.as_deref()) {
            config = config.font_size(size);
        }

        config
    }
}

/// Parse an integer field, saturating numbers too large for `i64` so they
/// clamp like any other out-of-range value.
fn parse_integer(name: &str, raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => {
                tracing::debug!(field = name, value = raw, "Ignoring unparseable value");
                None
            }
        },
    }
}

/// Rendered art plus the settings that produced it
#[derive(Debug, Serialize, ToSchema)]
pub struct RenderResponse {
    /// Lines of glyphs, each terminated by a newline; empty without an image
    pub art: String,
    pub columns: u32,
    pub rows: u32,
    /// Width actually used, after clamping to the image
    pub width: u32,
    /// Palette name
    pub palette: String,
    /// Palette index in the fixed table
    pub palette_index: usize,
    /// `simple` or `perceptual`
    pub weighting: String,
    pub font_size: u8,
    /// Whether the session had an image to render
    pub has_image: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_height: Option<u32>,
}

impl From<Rendered> for RenderResponse {
    fn from(rendered: Rendered) -> Self {
        let Rendered {
            art,
            config,
            source_size,
        } = rendered;

        Self {
            columns: art.columns(),
            rows: art.rows(),
            art: art.into_text(),
            width: config.width,
            palette: config.palette.name().to_string(),
            palette_index: config.palette.index(),
            weighting: config.weighting.name().to_string(),
            font_size: config.font_size,
            has_image: source_size.is_some(),
            source_width: source_size.map(|(w, _)| w),
            source_height: source_size.map(|(_, h)| h),
        }
    }
}

async fn render_for_request(
    config: &AppConfig,
    art: &ArtService,
    headers: &HeaderMap,
    query: &RenderQuery,
) -> Result<Rendered, ApiError> {
    let settings = query.resolve(config.default_render_config());
    let session = headers.session_id();
    art.render(session.as_ref(), settings).await
}

/// Render the session's image as ASCII art
///
/// Without an uploaded image the art is empty and `has_image` is false.
#[utoipa::path(
    get,
    path = "/api/render",
    params(RenderQuery),
    responses(
        (status = 200, description = "Rendered art", body = RenderResponse),
    ),
    tag = "Render"
)]
pub async fn handle_render(
    State(config): State<Arc<AppConfig>>,
    State(art): State<Arc<ArtService>>,
    headers: HeaderMap,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderResponse>, ApiError> {
    let rendered = render_for_request(&config, &art, &headers, &query).await?;
    Ok(Json(rendered.into()))
}

/// Render the session's image as plain text
#[utoipa::path(
    get,
    path = "/api/render.txt",
    params(RenderQuery),
    responses(
        (status = 200, description = "Rendered art", content_type = "text/plain"),
    ),
    tag = "Render"
)]
pub async fn handle_render_text(
    State(config): State<Arc<AppConfig>>,
    State(art): State<Arc<ArtService>>,
    headers: HeaderMap,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    let rendered = render_for_request(&config, &art, &headers, &query).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        rendered.art.into_text(),
    )
        .into_response())
}
