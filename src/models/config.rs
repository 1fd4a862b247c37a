use crate::assets::AssetLoader;
use crate::services::{DEFAULT_CACHED_IMAGES, DEFAULT_IMAGE_TTL, DEFAULT_MAX_SESSIONS};
use ascii_render::{clamp_font_size, Palette, RenderConfig, Weighting, DEFAULT_FONT_SIZE};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Defaults applied when a render request omits a setting
    #[serde(default)]
    pub render: RenderDefaults,

    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,

    /// Snapshot persistence
    #[serde(default)]
    pub session: SessionConfig,
}

/// A palette given either by index or by name
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PaletteRef {
    Index(usize),
    Name(String),
}

impl PaletteRef {
    pub fn resolve(&self) -> Option<Palette> {
        match self {
            PaletteRef::Index(i) => Palette::from_index(*i),
            PaletteRef::Name(name) => Palette::parse(name),
        }
    }
}

/// Default render settings
#[derive(Debug, Deserialize, Clone)]
pub struct RenderDefaults {
    /// Output width in columns
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_palette")]
    pub palette: PaletteRef,

    /// `simple` or `perceptual`
    #[serde(default = "default_weighting")]
    pub weighting: String,

    /// Font display size in points, clamped to [1, 6]
    #[serde(default = "default_font_size")]
    pub font_size: i64,
}

fn default_width() -> u32 {
    ascii_render::DEFAULT_WIDTH
}

fn default_palette() -> PaletteRef {
    PaletteRef::Index(0)
}

fn default_weighting() -> String {
    Weighting::default().name().to_string()
}

fn default_font_size() -> i64 {
    DEFAULT_FONT_SIZE as i64
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            width: default_width(),
            palette: default_palette(),
            weighting: default_weighting(),
            font_size: default_font_size(),
        }
    }
}

impl RenderDefaults {
    /// Resolve into a [`RenderConfig`], falling back per field on bad values.
    pub fn to_render_config(&self) -> RenderConfig {
        let palette = self.palette.resolve().unwrap_or_else(|| {
            tracing::warn!(palette = ?self.palette, "Unknown default palette, using first");
            Palette::default()
        });
        let weighting = Weighting::parse(&self.weighting).unwrap_or_else(|| {
            tracing::warn!(weighting = %self.weighting, "Unknown default weighting, using simple");
            Weighting::default()
        });

        RenderConfig {
            width: self.width.max(1),
            palette,
            weighting,
            font_size: clamp_font_size(self.font_size),
        }
    }
}

/// Upload limits
#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Maximum request body size for image uploads
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

/// Where uploaded image snapshots are kept, and how many
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Directory for snapshot files; snapshots stay in memory when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Sessions kept by the in-memory store before the oldest is forgotten
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Decoded images held at once
    #[serde(default = "default_cached_images")]
    pub cached_images: usize,

    /// Seconds a decoded image is held before it is decoded again
    #[serde(default = "default_image_ttl_secs")]
    pub image_ttl_secs: u64,
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

fn default_cached_images() -> usize {
    DEFAULT_CACHED_IMAGES
}

fn default_image_ttl_secs() -> u64 {
    DEFAULT_IMAGE_TTL.as_secs()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_sessions: default_max_sessions(),
            cached_images: default_cached_images(),
            image_ttl_secs: default_image_ttl_secs(),
        }
    }
}

impl SessionConfig {
    pub fn image_ttl(&self) -> Duration {
        Duration::from_secs(self.image_ttl_secs)
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        width = config.render.width,
                        palette = ?config.render.palette,
                        weighting = %config.render.weighting,
                        max_upload_bytes = config.upload.max_bytes,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Render settings used when a request leaves them out
    pub fn default_render_config(&self) -> RenderConfig {
        self.render.to_render_config()
    }
}
