//! Error envelope rendering, development details, panic recovery, and
//! request timeouts.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use cinereview_api::auth::jwt::JwtConfig;
use cinereview_api::config::{AppEnvironment, ServerConfig};
use cinereview_api::error::AppError;
use cinereview_api::middleware::errors::{
    expose_error_details, handle_panic, handle_timeout, TIMEOUT_MESSAGE,
};
use cinereview_core::error::CoreError;
use common::{assert_error, body_json, get_auth, post_json, register, test_config, TEST_PASSWORD};
use serde_json::json;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

fn development_config() -> ServerConfig {
    ServerConfig {
        environment: AppEnvironment::Development,
        ..test_config()
    }
}

// ---------------------------------------------------------------------------
// AppError -> response mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn core_errors_map_to_statuses() {
    let cases = [
        (
            AppError::Core(CoreError::NotFound { entity: "Movie", id: 3 }),
            StatusCode::NOT_FOUND,
            "Movie with id 3 not found",
        ),
        (
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())),
            StatusCode::UNAUTHORIZED,
            "Invalid or expired token",
        ),
        (
            AppError::Core(CoreError::Forbidden("You cannot edit this review.".into())),
            StatusCode::FORBIDDEN,
            "You cannot edit this review.",
        ),
        (
            AppError::BadRequest("Bad input".into()),
            StatusCode::BAD_REQUEST,
            "Bad input",
        ),
    ];

    for (error, status, message) in cases {
        let json = assert_error(error.into_response(), status, message).await;
        assert!(json["details"].is_null());
    }
}

#[tokio::test]
async fn server_errors_are_sanitized() {
    let errors = [
        AppError::InternalError("connection string leaked".into()),
        AppError::Core(CoreError::Configuration("JWT key missing".into())),
        AppError::Database(sqlx::Error::PoolTimedOut),
    ];

    for error in errors {
        let json = assert_error(
            error.into_response(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error.",
        )
        .await;
        assert!(json["details"].is_null());
    }
}

#[tokio::test]
async fn missing_row_is_404() {
    let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
    assert_error(response, StatusCode::NOT_FOUND, "Resource not found").await;
}

// ---------------------------------------------------------------------------
// Development details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn development_mode_fills_details() {
    let app = common::build_test_app_with(development_config());
    let (token, _) = register(&app, "alice").await;

    let response = get_auth(app, "/api/Movies/GetById/12", &token).await;
    let json = assert_error(response, StatusCode::NOT_FOUND, "Movie with id 12 not found").await;
    let details = json["details"].as_str().expect("details should be a string");
    assert!(details.contains("NotFound"), "details: {details}");
}

#[tokio::test]
async fn development_mode_keeps_500_message_generic() {
    let config = ServerConfig {
        jwt: JwtConfig {
            secret: None,
            ..test_config().jwt
        },
        ..development_config()
    };
    let app = common::build_test_app_with(config);

    let body = json!({ "username": "alice", "email": "alice@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/Auth/Register", body).await;
    let json = assert_error(response, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").await;
    assert!(json["details"].as_str().unwrap().contains("Configuration"));
}

#[tokio::test]
async fn production_mode_omits_details() {
    let app = common::build_test_app();
    let (token, _) = register(&app, "alice").await;

    let response = get_auth(app, "/api/Movies/GetById/12", &token).await;
    let json = body_json(response).await;
    assert!(json["details"].is_null());
}

// ---------------------------------------------------------------------------
// Panic recovery
// ---------------------------------------------------------------------------

async fn explode() -> &'static str {
    panic!("kaboom")
}

fn panicking_app(config: ServerConfig) -> Router {
    Router::new()
        .route("/explode", get(explode))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum::middleware::from_fn_with_state(
            Arc::new(config),
            expose_error_details,
        ))
}

#[tokio::test]
async fn panic_becomes_500_envelope() {
    let response = common::get(panicking_app(test_config()), "/explode").await;
    let json = assert_error(response, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").await;
    assert!(json["details"].is_null());
}

#[tokio::test]
async fn panic_message_shown_in_development() {
    let response = common::get(panicking_app(development_config()), "/explode").await;
    let json = assert_error(response, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").await;
    assert_eq!(json["details"], "panic: kaboom");
}

// ---------------------------------------------------------------------------
// Timeouts
// ---------------------------------------------------------------------------

async fn stall() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "too late"
}

async fn prompt() -> &'static str {
    "on time"
}

fn slow_app(config: ServerConfig) -> Router {
    Router::new()
        .route("/stall", get(stall))
        .route("/prompt", get(prompt))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    Arc::new(config),
                    expose_error_details,
                ))
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(Duration::from_millis(50))),
        )
}

#[tokio::test]
async fn timeout_becomes_408_envelope() {
    let response = common::get(slow_app(test_config()), "/stall").await;
    let json = assert_error(response, StatusCode::REQUEST_TIMEOUT, TIMEOUT_MESSAGE).await;
    assert!(json["details"].is_null());
}

#[tokio::test]
async fn timeout_details_shown_in_development() {
    let response = common::get(slow_app(development_config()), "/stall").await;
    let json = assert_error(response, StatusCode::REQUEST_TIMEOUT, TIMEOUT_MESSAGE).await;
    assert!(json["details"].as_str().unwrap().starts_with("timeout:"));
}

#[tokio::test]
async fn fast_requests_pass_the_timeout() {
    let response = common::get(slow_app(test_config()), "/prompt").await;
    assert_eq!(response.status(), StatusCode::OK);
}
