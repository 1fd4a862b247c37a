//! Render configuration.
//!
//! [`RenderConfig`] holds the user-adjustable settings. All of them are
//! re-applied to the same decoded image on every render; out-of-range
//! values are clamped, never rejected.

use crate::mapper::Weighting;
use crate::palette::Palette;

/// Output width used when nothing else is configured.
pub const DEFAULT_WIDTH: u32 = 200;

/// Smallest allowed font display size (points).
pub const FONT_SIZE_MIN: u8 = 1;
/// Largest allowed font display size (points).
pub const FONT_SIZE_MAX: u8 = 6;
/// Font display size used when nothing else is configured.
pub const DEFAULT_FONT_SIZE: u8 = 3;

/// Clamp a requested font size to `[FONT_SIZE_MIN, FONT_SIZE_MAX]`.
pub fn clamp_font_size(size: i64) -> u8 {
    size.clamp(FONT_SIZE_MIN as i64, FONT_SIZE_MAX as i64) as u8
}

/// Settings for one render.
///
/// # Example
///
/// ```
/// use ascii_render::{Palette, RenderConfig, Weighting};
///
/// let config = RenderConfig::new()
///     .width(120)
///     .palette(Palette::SmoothLight)
///     .weighting(Weighting::Perceptual)
///     .font_size(9);
///
/// assert_eq!(config.font_size, 6);
/// assert_eq!(config.effective_width(80), 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Requested output width in columns, before clamping to the source.
    pub width: u32,

    /// Glyph palette.
    pub palette: Palette,

    /// Brightness formula.
    pub weighting: Weighting,

    /// Font display size in points, always within the allowed range.
    ///
    /// Only affects presentation; the text itself does not depend on it.
    pub font_size: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            palette: Palette::default(),
            weighting: Weighting::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl RenderConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    #[inline]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[inline]
    pub fn weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Set the font size, clamped to the allowed range.
    #[inline]
    pub fn font_size(mut self, size: i64) -> Self {
        self.font_size = clamp_font_size(size);
        self
    }

    /// Width actually used for a source `source_width` pixels wide.
    ///
    /// Clamped to `[1, source_width]`.
    pub fn effective_width(&self, source_width: u32) -> u32 {
        self.width.clamp(1, source_width.max(1))
    }

    /// A copy with the width clamped for a source `source_width` pixels wide.
    pub fn clamp_to(self, source_width: u32) -> Self {
        let width = self.effective_width(source_width);
        self.width(width)
    }
}
