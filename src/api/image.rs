use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::headers::HeaderMapExt;
use crate::error::ApiError;
use crate::models::{AppConfig, SessionId};
use crate::services::ArtService;

/// Dimensions of an accepted upload
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageInfo {
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
    /// Largest output width accepted for this image
    pub max_width: u32,
    /// Configured default width, clamped to the image
    pub default_width: u32,
}

/// Media types accepted for uploads besides `image/*`
const GENERIC_UPLOAD_TYPE: &str = "application/octet-stream";

fn check_upload_type(headers: &HeaderMap) -> Result<(), ApiError> {
    match headers.media_type() {
        None => Ok(()),
        Some(media) if media.starts_with("image/") || media == GENERIC_UPLOAD_TYPE => Ok(()),
        Some(media) => Err(ApiError::UnsupportedMediaType(media)),
    }
}

/// Resolve the request's session, minting a new one when the cookie is absent
pub(crate) fn session_or_new(headers: &HeaderMap) -> (SessionId, bool) {
    match headers.session_id() {
        Some(id) => (id, false),
        None => (SessionId::generate(), true),
    }
}

fn set_cookie(response: &mut Response, session: &SessionId) -> Result<(), ApiError> {
    let value = HeaderValue::from_str(&session.cookie())
        .map_err(|e| ApiError::Internal(format!("Invalid session cookie: {e}")))?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(())
}

/// Upload the image to convert
///
/// The body is the raw file. On success it replaces the session's image;
/// on failure the previous image stays in place.
#[utoipa::path(
    post,
    path = "/api/image",
    request_body(content = Vec<u8>, description = "Raw image file", content_type = "image/*"),
    responses(
        (status = 200, description = "Image accepted", body = ImageInfo),
        (status = 413, description = "Upload exceeds the configured size limit"),
        (status = 415, description = "Content-Type is not an image type"),
        (status = 422, description = "Body could not be decoded as an image"),
    ),
    tag = "Image"
)]
pub async fn handle_upload(
    State(config): State<Arc<AppConfig>>,
    State(art): State<Arc<ArtService>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    check_upload_type(&headers)?;

    let (session, is_new) = session_or_new(&headers);
    let image = art.upload(&session, body.to_vec()).await?;

    let max_width = image.width();
    let default_width = config.default_render_config().effective_width(max_width);

    let mut response = Json(ImageInfo {
        width: image.width(),
        height: image.height(),
        max_width,
        default_width,
    })
    .into_response();

    if is_new {
        tracing::debug!(session = %session, "Started new session");
    }
    set_cookie(&mut response, &session)?;

    Ok(response)
}

/// Fetch the session's last uploaded image
#[utoipa::path(
    get,
    path = "/api/image",
    responses(
        (status = 200, description = "The stored upload, bytes unchanged"),
        (status = 404, description = "No image stored for this session"),
    ),
    tag = "Image"
)]
pub async fn handle_get_image(
    State(art): State<Arc<ArtService>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let session = headers.session_id().ok_or(ApiError::NotFound)?;
    let bytes = art.snapshot(&session).await?.ok_or(ApiError::NotFound)?;

    let content_type = ::image::guess_format(&bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(GENERIC_UPLOAD_TYPE);

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// Clear the session's image
#[utoipa::path(
    delete,
    path = "/api/image",
    responses(
        (status = 204, description = "Image cleared (or there was none)"),
    ),
    tag = "Image"
)]
pub async fn handle_clear_image(
    State(art): State<Arc<ArtService>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    if let Some(session) = headers.session_id() {
        art.clear(&session).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
