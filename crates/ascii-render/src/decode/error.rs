//! Error types for the decode boundary.

use std::fmt;

/// Error type for turning raw bytes into a [`SourceImage`](super::SourceImage).
///
/// A decode failure is terminal for the given input: callers report it once
/// and keep whatever image they had before.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// No bytes were supplied
    Empty,
    /// The bytes do not match any image format this build can read
    Unsupported(String),
    /// The format was recognized but the data could not be decoded
    Corrupt(String),
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => DecodeError::Unsupported(e.to_string()),
            other => DecodeError::Corrupt(other.to_string()),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Empty => write!(f, "no image data supplied"),
            DecodeError::Unsupported(msg) => write!(f, "unsupported image format: {}", msg),
            DecodeError::Corrupt(msg) => write!(f, "corrupt image data: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}
