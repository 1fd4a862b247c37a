use ascii_render::SourceImage;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::models::SessionId;

/// Decoded images held at once
pub const DEFAULT_CACHED_IMAGES: usize = 32;

/// How long a decoded image is kept after decoding
pub const DEFAULT_IMAGE_TTL: Duration = Duration::from_secs(30 * 60);

/// A decoded image held for a session
#[derive(Clone)]
pub struct CachedImage {
    /// Decoded pixels, shared with any render in flight
    pub image: Arc<SourceImage>,
    /// When the image was decoded
    pub decoded_at: DateTime<Utc>,
}

impl CachedImage {
    pub fn new(image: SourceImage) -> Self {
        Self {
            image: Arc::new(image),
            decoded_at: Utc::now(),
        }
    }

    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        // A decode time in the future never expires
        now.signed_duration_since(self.decoded_at)
            .to_std()
            .is_ok_and(|age| age > ttl)
    }
}

/// Decoded images keyed by session, so settings changes never re-decode
///
/// Bounded by entry count and age. Anything dropped here is rebuilt from
/// the session's snapshot on next use.
pub struct ImageCache {
    cache: Arc<RwLock<HashMap<SessionId, CachedImage>>>,
    capacity: usize,
    ttl: Duration,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_CACHED_IMAGES, DEFAULT_IMAGE_TTL)
    }

    /// A cache holding at most `capacity` images (at least one), each for
    /// at most `ttl` after decoding
    pub fn with_limits(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Store the decoded image for a session, replacing any previous one
    ///
    /// Expired entries go first; if the cache is still full the image
    /// decoded longest ago is evicted.
    pub async fn store(&self, session: &SessionId, image: CachedImage) {
        let mut cache = self.cache.write().await;

        let now = Utc::now();
        let before = cache.len();
        cache.retain(|_, cached| !cached.is_expired(now, self.ttl));
        let expired = before - cache.len();
        if expired > 0 {
            tracing::debug!(expired, "Dropped expired decoded images");
        }

        if !cache.contains_key(session) && cache.len() >= self.capacity {
            let oldest = cache
                .iter()
                .min_by_key(|(_, cached)| cached.decoded_at)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                cache.remove(&oldest);
                tracing::debug!(session = %oldest, "Evicted decoded image");
            }
        }

        cache.insert(session.clone(), image);
    }

    /// Retrieve the decoded image for a session, unless it has expired
    pub async fn get(&self, session: &SessionId) -> Option<CachedImage> {
        let now = Utc::now();
        {
            let cache = self.cache.read().await;
            match cache.get(session) {
                None => return None,
                Some(cached) if !cached.is_expired(now, self.ttl) => return Some(cached.clone()),
                Some(_) => {}
            }
        }

        let mut cache = self.cache.write().await;
        if cache
            .get(session)
            .is_some_and(|cached| cached.is_expired(now, self.ttl))
        {
            cache.remove(session);
        }
        None
    }

    /// Drop the decoded image for a session
    pub async fn remove(&self, session: &SessionId) {
        let mut cache = self.cache.write().await;
        cache.remove(session);
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn image(width: u32) -> SourceImage {
        SourceImage::from_rgb(RgbImage::from_pixel(width, 4, Rgb([0, 0, 0])))
    }

    fn decoded_minutes_ago(width: u32, minutes: i64) -> CachedImage {
        CachedImage {
            decoded_at: Utc::now() - chrono::Duration::minutes(minutes),
            ..CachedImage::new(image(width))
        }
    }

    #[tokio::test]
    async fn test_store_and_get() {
        let cache = ImageCache::new();
        let session = SessionId::generate();

        cache.store(&session, CachedImage::new(image(8))).await;
        let found = cache.get(&session).await.unwrap();
        assert_eq!(found.image.width(), 8);
    }

    #[tokio::test]
    async fn test_store_replaces_previous() {
        let cache = ImageCache::new();
        let session = SessionId::generate();

        cache.store(&session, CachedImage::new(image(8))).await;
        let held = cache.get(&session).await.unwrap();

        cache.store(&session, CachedImage::new(image(16))).await;
        assert_eq!(cache.get(&session).await.unwrap().image.width(), 16);
        // Earlier holders keep the image they started with
        assert_eq!(held.image.width(), 8);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = ImageCache::new();
        let session = SessionId::generate();

        cache.store(&session, CachedImage::new(image(8))).await;
        cache.remove(&session).await;
        assert!(cache.get(&session).await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_full_cache_evicts_oldest() {
        let cache = ImageCache::with_limits(2, DEFAULT_IMAGE_TTL);
        let (a, b, c) = (SessionId::generate(), SessionId::generate(), SessionId::generate());

        cache.store(&a, decoded_minutes_ago(1, 3)).await;
        cache.store(&b, decoded_minutes_ago(2, 2)).await;
        cache.store(&c, decoded_minutes_ago(3, 1)).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get(&a).await.is_none());
        assert_eq!(cache.get(&b).await.unwrap().image.width(), 2);
        assert_eq!(cache.get(&c).await.unwrap().image.width(), 3);
    }

    #[tokio::test]
    async fn test_replacing_does_not_evict() {
        let cache = ImageCache::with_limits(2, DEFAULT_IMAGE_TTL);
        let (a, b) = (SessionId::generate(), SessionId::generate());

        cache.store(&a, decoded_minutes_ago(1, 2)).await;
        cache.store(&b, decoded_minutes_ago(2, 1)).await;
        cache.store(&a, CachedImage::new(image(5))).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get(&b).await.is_some());
    }

    #[tokio::test]
    async fn test_expired_image_is_dropped() {
        let cache = ImageCache::with_limits(8, Duration::from_secs(60));
        let stale = SessionId::generate();
        let fresh = SessionId::generate();

        cache.store(&stale, decoded_minutes_ago(1, 5)).await;
        assert!(cache.get(&stale).await.is_none());
        assert!(cache.is_empty().await);

        cache.store(&stale, decoded_minutes_ago(1, 5)).await;
        cache.store(&fresh, CachedImage::new(image(2))).await;
        // The stale entry is swept by the next store
        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_many_sessions_stay_bounded() {
        let cache = ImageCache::with_limits(4, DEFAULT_IMAGE_TTL);
        for _ in 0..50 {
            cache.store(&SessionId::generate(), CachedImage::new(image(1))).await;
        }
        assert_eq!(cache.len().await, 4);
    }
}
