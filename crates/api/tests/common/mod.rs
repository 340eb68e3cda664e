#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use cinereview_api::auth::jwt::{validate_token, JwtConfig};
use cinereview_api::config::{AppEnvironment, ServerConfig};
use cinereview_api::router::build_app_router;
use cinereview_api::services::{AuthService, MovieService, ReviewService};
use cinereview_api::state::AppState;
use cinereview_core::types::DbId;
use cinereview_db::memory::MemoryStore;
use cinereview_omdb::{OmdbConfig, RatingGateway, NOT_AVAILABLE};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "P@ssw0rd!";

/// Gateway stand-in: known ratings for a few titles, `"N/A"` otherwise.
pub struct StubRatings;

#[async_trait]
impl RatingGateway for StubRatings {
    async fn imdb_rating(&self, title: &str) -> String {
        match title {
            "Inception" => "8.8".to_string(),
            "The Matrix" => "8.7".to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a fixed JWT key, and no OMDb key.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        environment: AppEnvironment::Production,
        jwt: JwtConfig {
            secret: Some("integration-test-secret-key".to_string()),
            issuer: "cinereview".to_string(),
            audience: "cinereview-clients".to_string(),
        },
        omdb: OmdbConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
            api_key: None,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

/// Same as [`build_test_app`] with a caller-supplied configuration.
pub fn build_test_app_with(config: ServerConfig) -> Router {
    let store = Arc::new(MemoryStore::new());

    let state = AppState {
        config: Arc::new(config.clone()),
        auth: Arc::new(AuthService::new(store.clone(), config.jwt.clone())),
        movies: Arc::new(MovieService::new(store.clone(), Arc::new(StubRatings))),
        reviews: Arc::new(ReviewService::new(store)),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Assert the error envelope shape and return the body.
pub async fn assert_error(response: Response<Body>, status: StatusCode, message: &str) -> Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["statusCode"], status.as_u16());
    assert_eq!(json["message"], message);
    json
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user through the API and return `(token, user_id)`.
pub async fn register(app: &Router, username: &str) -> (String, DbId) {
    let body = json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": TEST_PASSWORD,
    });
    let response = post_json(app.clone(), "/api/Auth/Register", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token").to_string();
    let user_id = validate_token(&token, &test_config().jwt)
        .expect("token should validate")
        .user_id()
        .expect("sub should be numeric");
    (token, user_id)
}

/// Add a movie through the API and return its id.
pub async fn add_movie(app: &Router, token: &str, title: &str, year: i32) -> DbId {
    let body = json!({
        "title": title,
        "description": format!("{title} description"),
        "releaseYear": year,
    });
    let response = post_json_auth(app.clone(), "/api/Movies/AddMovie", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().expect("id")
}

/// Add a review through the API and return its id.
pub async fn add_review(app: &Router, token: &str, movie_id: DbId, rating: i32) -> DbId {
    let body = json!({
        "content": "Solid film",
        "rating": rating,
        "movieId": movie_id,
    });
    let response = post_json_auth(app.clone(), "/api/Reviews/AddReview", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().expect("id")
}
