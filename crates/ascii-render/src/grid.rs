//! Color sample grid produced by the downsampler.

/// One grid cell's color: 8-bit red, green, and blue intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSample {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for ColorSample {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Dense `columns x rows` grid of samples in row-major order.
///
/// A grid may have zero rows (very flat images at small widths); an empty
/// grid maps to an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleGrid {
    samples: Vec<ColorSample>,
    columns: u32,
    rows: u32,
}

impl SampleGrid {
    /// Create a grid from row-major samples.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != columns * rows`.
    pub fn new(samples: Vec<ColorSample>, columns: u32, rows: u32) -> Self {
        assert_eq!(
            samples.len(),
            columns as usize * rows as usize,
            "sample count must equal columns * rows"
        );
        Self {
            samples,
            columns,
            rows,
        }
    }

    /// A grid with no cells.
    pub fn empty(columns: u32) -> Self {
        Self {
            samples: Vec::new(),
            columns,
            rows: 0,
        }
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[ColorSample]> {
        // chunks() rejects a zero chunk size; a zero-column grid has no samples anyway
        self.samples.chunks(self.columns.max(1) as usize)
    }

    /// All samples in row-major order.
    pub fn samples(&self) -> &[ColorSample] {
        &self.samples
    }
}
