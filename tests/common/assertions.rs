//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error response carries the JSON error envelope
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected an error message");
}

/// Assert a GET /api/render response and return its JSON
pub fn assert_render(response: &TestResponse) -> serde_json::Value {
    assert_ok(response);
    let json: serde_json::Value = response.json();
    for field in ["art", "palette", "weighting"] {
        assert!(json[field].is_string(), "Expected {field} to be a string");
    }
    for field in ["columns", "rows", "width", "palette_index", "font_size"] {
        assert!(json[field].is_u64(), "Expected {field} to be a number");
    }
    assert!(json["has_image"].is_boolean());
    json
}

/// Assert every line of `art` has exactly `columns` glyphs
pub fn assert_grid(art: &str, columns: usize, rows: usize) {
    let lines: Vec<&str> = art.lines().collect();
    assert_eq!(lines.len(), rows, "row count in:\n{art}");
    for line in lines {
        assert_eq!(line.chars().count(), columns, "line {line:?}");
    }
    if rows > 0 {
        assert!(art.ends_with('\n'), "every row ends with a newline");
    }
}
