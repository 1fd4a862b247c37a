//! Per-session image handling and rendering.
//!
//! Decoding and rendering are CPU-bound, so both run on the blocking pool.

use ascii_render::{render_art, AsciiArt, RenderConfig, SourceImage};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::ApiError;
use crate::models::SessionId;
use crate::services::{CachedImage, ImageCache, SessionStore};

/// Result of [`ArtService::render`]
#[derive(Debug, Clone)]
pub struct Rendered {
    pub art: AsciiArt,
    /// Settings actually used (width clamped to the image when there is one)
    pub config: RenderConfig,
    /// Source `(width, height)`, or `None` when no image was loaded
    pub source_size: Option<(u32, u32)>,
}

/// Ties the snapshot store and the decoded-image cache together
///
/// Every change to a session's image updates the store and the cache as
/// one step, so the two never disagree about which upload is current.
pub struct ArtService {
    store: Arc<dyn SessionStore>,
    images: Arc<ImageCache>,
    /// Held while the store and cache change; counts completed changes
    commit: Mutex<u64>,
}

impl ArtService {
    pub fn new(store: Arc<dyn SessionStore>, images: Arc<ImageCache>) -> Self {
        Self {
            store,
            images,
            commit: Mutex::new(0),
        }
    }

    /// Decode an upload and make it the session's image
    ///
    /// On a decode failure nothing is stored and the session keeps its
    /// previous image.
    pub async fn upload(
        &self,
        session: &SessionId,
        bytes: Vec<u8>,
    ) -> Result<Arc<SourceImage>, ApiError> {
        let size = bytes.len();
        let (bytes, decoded) = tokio::task::spawn_blocking(move || {
            let decoded = ascii_render::decode(&bytes);
            (bytes, decoded)
        })
        .await?;

        let image = match decoded {
            Ok(image) => image,
            Err(e) => {
                tracing::info!(session = %session, bytes = size, error = %e, "Rejected upload");
                return Err(e.into());
            }
        };

        let cached = CachedImage::new(image);
        let image = cached.image.clone();
        {
            let mut commits = self.commit.lock().await;
            self.store.save(session, bytes).await?;
            self.images.store(session, cached).await;
            *commits += 1;
        }

        tracing::info!(
            session = %session,
            bytes = size,
            width = image.width(),
            height = image.height(),
            "Image uploaded"
        );

        Ok(image)
    }

    /// The session's decoded image, restoring it from the snapshot if needed
    ///
    /// A snapshot that no longer decodes is discarded. If the session changed
    /// while the snapshot was decoding, the restored image is not cached.
    pub async fn image(
        &self,
        session: &SessionId,
    ) -> Result<Option<Arc<SourceImage>>, ApiError> {
        if let Some(cached) = self.images.get(session).await {
            return Ok(Some(cached.image));
        }

        let seen = *self.commit.lock().await;
        let Some(bytes) = self.store.load(session).await? else {
            return Ok(None);
        };

        let decoded = tokio::task::spawn_blocking(move || ascii_render::decode(&bytes)).await?;
        let commits = self.commit.lock().await;
        let unchanged = *commits == seen;

        match decoded {
            Ok(image) => {
                if !unchanged {
                    if let Some(cached) = self.images.get(session).await {
                        return Ok(Some(cached.image));
                    }
                    return Ok(Some(Arc::new(image)));
                }

                let cached = CachedImage::new(image);
                let image = cached.image.clone();
                self.images.store(session, cached).await;
                tracing::info!(
                    session = %session,
                    width = image.width(),
                    height = image.height(),
                    "Restored image from snapshot"
                );
                Ok(Some(image))
            }
            Err(e) => {
                if unchanged {
                    tracing::warn!(session = %session, error = %e, "Discarding unreadable snapshot");
                    self.store.clear(session).await?;
                }
                Ok(None)
            }
        }
    }

    /// Raw bytes of the session's last upload
    pub async fn snapshot(&self, session: &SessionId) -> Result<Option<Vec<u8>>, ApiError> {
        Ok(self.store.load(session).await?)
    }

    /// Forget the session's image, decoded and stored
    pub async fn clear(&self, session: &SessionId) -> Result<(), ApiError> {
        {
            let mut commits = self.commit.lock().await;
            self.images.remove(session).await;
            self.store.clear(session).await?;
            *commits += 1;
        }
        tracing::info!(session = %session, "Image cleared");
        Ok(())
    }

    /// Render the session's image; no session or no image renders empty
    pub async fn render(
        &self,
        session: Option<&SessionId>,
        config: RenderConfig,
    ) -> Result<Rendered, ApiError> {
        let image = match session {
            Some(session) => self.image(session).await?,
            None => None,
        };

        let Some(image) = image else {
            return Ok(Rendered {
                art: AsciiArt::default(),
                config,
                source_size: None,
            });
        };

        let source_size = (image.width(), image.height());
        let config = config.clamp_to(image.width());
        let art =
            tokio::task::spawn_blocking(move || render_art(Some(image.as_ref()), &config)).await?;

        tracing::debug!(
            columns = art.columns(),
            rows = art.rows(),
            palette = %config.palette,
            weighting = %config.weighting,
            "Rendered"
        );

        Ok(Rendered {
            art,
            config,
            source_size: Some(source_size),
        })
    }
}
