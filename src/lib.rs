//! Asciify - images to ASCII art in the browser
//!
//! HTTP server around the `ascii-render` crate: sessions upload an image,
//! then re-render it with different settings.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
