//! Scalar brightness from a color sample.

use std::fmt;
use std::str::FromStr;

use crate::grid::ColorSample;

/// Perceptual channel weights (ITU-R BT.601 luma) in thousandths.
///
/// They sum to exactly 1000, so pure white is exactly 255.0.
pub const LUMA_R: f64 = 299.0;
pub const LUMA_G: f64 = 587.0;
pub const LUMA_B: f64 = 114.0;

/// How the three channels combine into one brightness value.
///
/// Both modes yield values in `[0, 255]`. They are not equivalent: a
/// saturated green reads much brighter under [`Weighting::Perceptual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weighting {
    /// `(R + G + B) / 3`
    #[default]
    Simple,
    /// `0.299 R + 0.587 G + 0.114 B`
    Perceptual,
}

impl Weighting {
    /// Parse a weighting name. Accepts `simple`/`average` and
    /// `perceptual`/`weighted`, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "average" => Some(Weighting::Simple),
            "perceptual" | "weighted" => Some(Weighting::Perceptual),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weighting::Simple => "simple",
            Weighting::Perceptual => "perceptual",
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no [`Weighting`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWeightingError(String);

impl fmt::Display for ParseWeightingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown weighting '{}' (expected 'simple' or 'perceptual')",
            self.0
        )
    }
}

impl std::error::Error for ParseWeightingError {}

impl FromStr for Weighting {
    type Err = ParseWeightingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weighting::parse(s).ok_or_else(|| ParseWeightingError(s.trim().to_string()))
    }
}

/// Brightness of `sample` under `weighting`, in `[0, 255]`.
#[inline]
pub fn brightness(sample: ColorSample, weighting: Weighting) -> f64 {
    let r = sample.r as f64;
    let g = sample.g as f64;
    let b = sample.b as f64;

    match weighting {
        Weighting::Simple => (r + g + b) / 3.0,
        Weighting::Perceptual => (LUMA_R * r + LUMA_G * g + LUMA_B * b) / 1000.0,
    }
}
