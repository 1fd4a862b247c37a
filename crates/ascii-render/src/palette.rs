//! Fixed glyph palettes.
//!
//! Palettes are a closed set. Their indices are part of the user-facing
//! contract (the page's radio buttons submit them), so variants must never
//! be reordered; new palettes go at the end.

use std::fmt;
use std::str::FromStr;

const MINIMALIST: &[char] = &['@', '#', 'x', ' ', ' ', ' '];
const MINIMALIST_SHADED: &[char] = &['@', '#', 'x', '-', ':', ' '];
const REDUCED: &[char] = &['@', '#', 'x', ' ', ' '];
const DETAILED: &[char] = &['@', 'Q', '#', '-', ':', ' ', ' '];
const DETAILED_SOLID: &[char] = &['@', 'Q', '#', 'x', ' ', ' ', ' '];
// Reads best on a dark background
const SMOOTH_DARK: &[char] = &['@', 'Q', '#', 'x', '-', '.', ' ', ' ', ' ', ' ', ' '];
// Reads best on a light background
const SMOOTH_LIGHT: &[char] = &['@', 'Q', '#', 'x', '+', '-', ':', '^', '>', '.', ' '];

/// A named glyph sequence, densest glyph first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Palette {
    #[default]
    Minimalist,
    MinimalistShaded,
    Reduced,
    Detailed,
    DetailedSolid,
    SmoothDark,
    SmoothLight,
}

impl Palette {
    /// Every palette in index order.
    pub const ALL: [Palette; 7] = [
        Palette::Minimalist,
        Palette::MinimalistShaded,
        Palette::Reduced,
        Palette::Detailed,
        Palette::DetailedSolid,
        Palette::SmoothDark,
        Palette::SmoothLight,
    ];

    /// Look up a palette by its stable index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Look up a palette by name (as returned by [`Palette::name`]).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Parse either a numeric index or a name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().parse::<usize>() {
            Ok(index) => Self::from_index(index),
            Err(_) => Self::from_name(s),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Palette::Minimalist => "minimalist",
            Palette::MinimalistShaded => "minimalist-shaded",
            Palette::Reduced => "reduced",
            Palette::Detailed => "detailed",
            Palette::DetailedSolid => "detailed-solid",
            Palette::SmoothDark => "smooth-dark",
            Palette::SmoothLight => "smooth-light",
        }
    }

    /// Glyphs from darkest/densest to lightest/sparsest.
    pub fn glyphs(self) -> &'static [char] {
        match self {
            Palette::Minimalist => MINIMALIST,
            Palette::MinimalistShaded => MINIMALIST_SHADED,
            Palette::Reduced => REDUCED,
            Palette::Detailed => DETAILED,
            Palette::DetailedSolid => DETAILED_SOLID,
            Palette::SmoothDark => SMOOTH_DARK,
            Palette::SmoothLight => SMOOTH_LIGHT,
        }
    }

    pub fn len(self) -> usize {
        self.glyphs().len()
    }

    pub fn is_empty(self) -> bool {
        self.glyphs().is_empty()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is neither a palette index nor a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePaletteError(String);

impl fmt::Display for ParsePaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown palette '{}' (expected an index 0-{} or a name)",
            self.0,
            Palette::ALL.len() - 1
        )
    }
}

impl std::error::Error for ParsePaletteError {}

impl FromStr for Palette {
    type Err = ParsePaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::parse(s).ok_or_else(|| ParsePaletteError(s.trim().to_string()))
    }
}
