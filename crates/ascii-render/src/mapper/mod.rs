//! Glyph mapper
//!
//! Converts a [`SampleGrid`](crate::SampleGrid) into text by computing a
//! brightness per cell and indexing linearly into a glyph sequence.

mod brightness;
mod glyphs;

pub use brightness::{brightness, ParseWeightingError, Weighting, LUMA_B, LUMA_G, LUMA_R};
pub use glyphs::{glyph_index, map_glyphs, LINE_SEPARATOR};
