//! Decoded source images.

use image::RgbImage;

use super::DecodeError;

/// A decoded bitmap, immutable once created.
///
/// Only the color channels are kept; any opacity channel in the input is
/// discarded at decode time.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbImage,
}

impl SourceImage {
    /// Wrap an already-decoded RGB buffer.
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the underlying pixel buffer.
    #[inline]
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Decode raw image file bytes into a [`SourceImage`].
///
/// The format is sniffed from the bytes themselves, so a file extension or
/// MIME type is not needed.
///
/// # Errors
///
/// Returns [`DecodeError::Empty`] for an empty slice,
/// [`DecodeError::Unsupported`] when no known format matches, and
/// [`DecodeError::Corrupt`] when a known format fails to decode.
///
/// # Example
///
/// ```
/// use ascii_render::decode;
///
/// assert!(decode(b"definitely not an image").is_err());
/// ```
pub fn decode(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let decoded = image::load_from_memory(bytes)?;
    Ok(SourceImage::from_rgb(decoded.to_rgb8()))
}
