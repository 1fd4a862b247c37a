pub mod art_service;
pub mod image_cache;
pub mod session_store;

pub use art_service::{ArtService, Rendered};
pub use image_cache::{CachedImage, ImageCache, DEFAULT_CACHED_IMAGES, DEFAULT_IMAGE_TTL};
pub use session_store::{
    FileSessionStore, InMemorySessionStore, SessionStore, DEFAULT_MAX_SESSIONS,
};
