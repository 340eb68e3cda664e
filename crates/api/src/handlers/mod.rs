pub mod auth;
pub mod movies;
pub mod reviews;

use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue};

/// Build a `Location` header for a `201 Created` response.
pub(crate) fn location(path: String) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::try_from(path) {
        headers.insert(LOCATION, value);
    }
    headers
}
