//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use asciify::assets::AssetLoader;
use asciify::models::AppConfig;
use asciify::server::{build_router, create_app_state, create_app_state_with_store, AppState};
use asciify::services::{ImageCache, SessionStore};

/// Test application with router and direct access to services
///
/// Behaves like a browser: the session cookie from any `Set-Cookie`
/// response is sent with every later request.
pub struct TestApp {
    router: axum::Router,
    pub images: Arc<ImageCache>,
    cookie: Mutex<Option<String>>,
}

impl TestApp {
    /// Create a new test application using embedded assets
    pub fn new() -> Self {
        // Create asset loader with embedded assets only (no external paths)
        let asset_loader = Arc::new(AssetLoader::new(None, None));
        let state = create_app_state(asset_loader).expect("Failed to create app state");
        Self::from_state(state)
    }

    /// Create a test app around a given snapshot store
    ///
    /// Two apps sharing one store behave like the same server before and
    /// after a restart: snapshots survive, decoded images do not.
    pub fn with_store(store: Arc<dyn SessionStore>) -> Self {
        Self::with_config_and_store(AppConfig::default(), store)
    }

    pub fn with_config_and_store(config: AppConfig, store: Arc<dyn SessionStore>) -> Self {
        let asset_loader = Arc::new(AssetLoader::new(None, None));
        Self::from_state(create_app_state_with_store(asset_loader, config, store))
    }

    fn from_state(state: AppState) -> Self {
        let images = state.images.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            images,
            cookie: Mutex::new(None),
        }
    }

    /// The `name=value` session cookie currently held, if any
    pub fn cookie(&self) -> Option<String> {
        self.cookie.lock().unwrap().clone()
    }

    /// Use a specific session cookie for later requests
    pub fn set_cookie(&self, cookie: Option<String>) {
        *self.cookie.lock().unwrap() = cookie;
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path), Body::empty()).await
    }

    /// Make a DELETE request to the given path
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path), Body::empty()).await
    }

    /// Make a POST request with a raw body and optional Content-Type
    pub async fn post_bytes(
        &self,
        path: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> TestResponse {
        let mut builder = Request::post(path);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.request(builder, Body::from(body)).await
    }

    /// Upload image bytes as `image/png`
    pub async fn upload_png(&self, png: Vec<u8>) -> TestResponse {
        self.post_bytes("/api/image", Some("image/png"), png).await
    }

    /// Send a request to the router
    async fn request(&self, mut builder: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = self.cookie() {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        if let Some(set_cookie) = headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok()) {
            let pair = set_cookie.split(';').next().unwrap_or_default().to_string();
            self.set_cookie(Some(pair));
        }

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
