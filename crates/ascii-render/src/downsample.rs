//! Downsampling a source image to the character grid.
//!
//! Output rows are halved relative to the plain aspect ratio because
//! monospace glyph cells are roughly twice as tall as they are wide.

use image::imageops::{self, FilterType};

use crate::decode::SourceImage;
use crate::grid::{ColorSample, SampleGrid};

/// Fixed vertical correction for monospace glyph cells.
///
/// Not derived from font metrics. Changing it changes every rendering.
pub const CELL_ASPECT_CORRECTION: f64 = 2.0;

/// Compute `(columns, rows)` for a source of the given size at `width` columns.
///
/// `rows = floor(width * (source_height / source_width) / 2)`. A zero
/// `width` or zero-sized source yields `(width, 0)`.
///
/// ```
/// use ascii_render::grid_dimensions;
///
/// assert_eq!(grid_dimensions(400, 300, 200), (200, 75));
/// assert_eq!(grid_dimensions(1000, 1, 10), (10, 0));
/// ```
pub fn grid_dimensions(source_width: u32, source_height: u32, width: u32) -> (u32, u32) {
    if width == 0 || source_width == 0 || source_height == 0 {
        return (width, 0);
    }

    let aspect_ratio = source_height as f64 / source_width as f64;
    let rows = (width as f64 * aspect_ratio / CELL_ASPECT_CORRECTION).floor();
    (width, rows as u32)
}

/// Resample `image` to a [`SampleGrid`] with `width` columns.
///
/// Uses bilinear filtering; exact sample values depend on the filter but
/// the grid dimensions always follow [`grid_dimensions`]. When the computed
/// row count is zero the grid is empty and no resampling happens.
pub fn downsample(image: &SourceImage, width: u32) -> SampleGrid {
    let (columns, rows) = grid_dimensions(image.width(), image.height(), width);
    if columns == 0 || rows == 0 {
        return SampleGrid::empty(columns);
    }

    let resized = imageops::resize(image.pixels(), columns, rows, FilterType::Triangle);
    let samples = resized
        .pixels()
        .map(|pixel| ColorSample::from(pixel.0))
        .collect();

    SampleGrid::new(samples, columns, rows)
}
