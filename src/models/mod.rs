pub mod config;
pub mod session;

pub use config::{AppConfig, PaletteRef, RenderDefaults, SessionConfig, UploadConfig};
pub use session::{SessionId, SESSION_COOKIE};
