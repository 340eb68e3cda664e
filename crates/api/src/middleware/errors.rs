//! Error envelope post-processing.
//!
//! Every error response carries a [`DetailedError`] extension. In development
//! the envelope is re-rendered from it so that `details` is filled in; in
//! production the body is left as is (`details: null`). Panics and timeouts
//! raised by the middleware stack are rendered into the same envelope here.

use std::any::Any;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::BoxError;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::config::ServerConfig;
use crate::error::{error_response, DetailedError, INTERNAL_ERROR_MESSAGE};

/// Message returned when a request exceeds `REQUEST_TIMEOUT_SECS`.
pub const TIMEOUT_MESSAGE: &str = "Request timed out.";

/// Replace the error body with its detailed form when running in development.
pub async fn expose_error_details(
    State(config): State<Arc<ServerConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !config.environment.is_development() {
        return response;
    }

    let Some(DetailedError(body)) = response.extensions().get::<DetailedError>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    let mut detailed = (parts.status, Json(body)).into_response();
    *detailed.headers_mut() = parts.headers;
    detailed
}

/// Render a caught panic as a 500 envelope.
///
/// Used with `CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let panic_message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %panic_message, "Handler panicked");

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE.to_string(),
        format!("panic: {panic_message}"),
    )
}

/// Render an error from the timeout layer.
///
/// Used with `HandleErrorLayer`. An elapsed deadline is a 408; anything else
/// the layer surfaces is a 500.
pub async fn handle_timeout(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
        return error_response(
            StatusCode::REQUEST_TIMEOUT,
            TIMEOUT_MESSAGE.to_string(),
            format!("timeout: {err}"),
        );
    }

    tracing::error!(error = %err, "Middleware error");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE.to_string(),
        err.to_string(),
    )
}
