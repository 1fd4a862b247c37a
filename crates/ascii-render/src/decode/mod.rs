//! Decode boundary
//!
//! Turns raw uploaded bytes into a [`SourceImage`] the transform can use.

mod error;
mod source;

pub use error::DecodeError;
pub use source::{decode, SourceImage};
