//! Brightness-to-glyph mapping.

use super::brightness::{brightness, Weighting};
use crate::grid::SampleGrid;

/// Line separator appended after every row.
pub const LINE_SEPARATOR: char = '\n';

/// Palette index for a brightness in `[0, 255]` and a palette of `len` glyphs.
///
/// `floor((brightness / 255) * (len - 1))`, clamped to `[0, len - 1]`.
/// Returns 0 for an empty palette.
#[inline]
pub fn glyph_index(brightness: f64, len: usize) -> usize {
    let Some(max) = len.checked_sub(1) else {
        return 0;
    };

    let idx = ((brightness / 255.0) * max as f64).floor();
    // NaN and negatives both land on 0
    if idx > 0.0 {
        (idx as usize).min(max)
    } else {
        0
    }
}

/// Render a grid as text: one glyph per cell and a newline after each row.
///
/// An empty grid or an empty glyph slice yields an empty string.
///
/// ```
/// use ascii_render::{map_glyphs, ColorSample, SampleGrid, Weighting};
///
/// let grid = SampleGrid::new(
///     vec![ColorSample::new(0, 0, 0), ColorSample::new(255, 255, 255)],
///     2,
///     1,
/// );
/// assert_eq!(map_glyphs(&grid, &['@', ' '], Weighting::Simple), "@ \n");
/// ```
pub fn map_glyphs(grid: &SampleGrid, glyphs: &[char], weighting: Weighting) -> String {
    if grid.is_empty() || glyphs.is_empty() {
        return String::new();
    }

    let capacity = (grid.columns() as usize + 1) * grid.rows() as usize;
    let mut art = String::with_capacity(capacity);

    for row in grid.iter_rows() {
        for &sample in row {
            let idx = glyph_index(brightness(sample, weighting), glyphs.len());
            art.push(glyphs[idx]);
        }
        art.push(LINE_SEPARATOR);
    }

    art
}
