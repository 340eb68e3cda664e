//! Route definitions for the `/Auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/Auth`.
///
/// ```text
/// POST /Register  -> register
/// POST /Login     -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/Register", post(auth::register))
        .route("/Login", post(auth::login))
}
