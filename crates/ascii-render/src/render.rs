//! Transform entry point: image + configuration in, text out.

use crate::config::RenderConfig;
use crate::decode::SourceImage;
use crate::downsample::downsample;
use crate::mapper::map_glyphs;

/// Text produced by one render, with the grid size it was produced at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AsciiArt {
    text: String,
    columns: u32,
    rows: u32,
}

impl AsciiArt {
    /// The rendering: `rows` lines of `columns` glyphs, each ending in `\n`.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Render `image` with `config`, keeping the grid dimensions.
///
/// With no image the result is empty (zero columns, zero rows).
pub fn render_art(image: Option<&SourceImage>, config: &RenderConfig) -> AsciiArt {
    let Some(image) = image else {
        return AsciiArt::default();
    };

    let grid = downsample(image, config.effective_width(image.width()));
    let text = map_glyphs(&grid, config.palette.glyphs(), config.weighting);

    AsciiArt {
        text,
        columns: grid.columns(),
        rows: grid.rows(),
    }
}

/// Render `image` with `config` to text.
///
/// Pure: the same image and configuration always produce the same string.
/// `None` (no image loaded) produces an empty string.
///
/// ```
/// use ascii_render::{render, RenderConfig};
///
/// assert_eq!(render(None, &RenderConfig::default()), "");
/// ```
pub fn render(image: Option<&SourceImage>, config: &RenderConfig) -> String {
    render_art(image, config).into_text()
}
