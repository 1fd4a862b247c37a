//! ascii-render: brightness-to-glyph ASCII art for raster images
//!
//! The crate performs one forward transform: a decoded image is resampled to
//! a character grid and every cell's brightness picks a glyph from a fixed
//! palette. It keeps no state between calls.
//!
//! # Quick Start
//!
//! ```
//! use ascii_render::{render, Palette, RenderConfig, SourceImage, Weighting};
//! use image::{Rgb, RgbImage};
//!
//! let image = SourceImage::from_rgb(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));
//! let config = RenderConfig::new()
//!     .width(4)
//!     .palette(Palette::Minimalist)
//!     .weighting(Weighting::Simple);
//!
//! assert_eq!(render(Some(&image), &config), "@@@@\n@@@@\n");
//! ```
//!
//! # Pipeline
//!
//! ```text
//! raw bytes ──decode()──> SourceImage
//!                              |
//!                  downsample(image, width)
//!                              |
//!                              v
//!                 SampleGrid (width x floor(width * h/w / 2))
//!                              |
//!            map_glyphs(grid, palette.glyphs(), weighting)
//!                              |
//!                              v
//!                 text: one line per row, '\n'-terminated
//! ```
//!
//! The row count is halved because monospace cells are about twice as tall
//! as they are wide. See [`CELL_ASPECT_CORRECTION`].
//!
//! # Brightness
//!
//! | [`Weighting`] | Formula |
//! |---------------|---------|
//! | `Simple` (default) | `(R + G + B) / 3` |
//! | `Perceptual` | `0.299 R + 0.587 G + 0.114 B` |
//!
//! The palette index is `floor(B / 255 * (n - 1))` clamped to `[0, n - 1]`.

pub mod config;
pub mod decode;
pub mod downsample;
pub mod grid;
pub mod mapper;
pub mod palette;
pub mod render;


pub use config::{
    clamp_font_size, RenderConfig, DEFAULT_FONT_SIZE, DEFAULT_WIDTH, FONT_SIZE_MAX, FONT_SIZE_MIN,
};
pub use decode::{decode, DecodeError, SourceImage};
pub use downsample::{downsample, grid_dimensions, CELL_ASPECT_CORRECTION};
pub use grid::{ColorSample, SampleGrid};
pub use mapper::{brightness, glyph_index, map_glyphs, ParseWeightingError, Weighting};
pub use palette::{Palette, ParsePaletteError};
pub use render::{render, render_art, AsciiArt};
