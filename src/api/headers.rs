//! Header parsing utilities for page and API requests.

use axum::http::{header, HeaderMap};

use crate::models::{SessionId, SESSION_COOKIE};

/// Extension trait for convenient header parsing.
pub trait HeaderMapExt {
    /// Get a header value as a string, returning None if missing.
    fn get_str(&self, name: &str) -> Option<&str>;

    /// Get a cookie value by name from any `Cookie` header.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// The session id from the session cookie, if present and well-formed.
    fn session_id(&self) -> Option<SessionId>;

    /// The media type of `Content-Type`, lowercased and without parameters.
    fn media_type(&self) -> Option<String>;
}

impl HeaderMapExt for HeaderMap {
    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.trim())
    }

    fn session_id(&self) -> Option<SessionId> {
        self.cookie(SESSION_COOKIE).and_then(SessionId::parse)
    }

    fn media_type(&self) -> Option<String> {
        self.get_str(header::CONTENT_TYPE.as_str()).map(|v| {
            v.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }
}
