//! Handlers for the `/Auth` resource (register, login).

use axum::extract::State;
use axum::Json;
use cinereview_core::error::CoreError;

use crate::dto::auth::{AuthResult, LoginRequest, RegisterRequest};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// POST /api/Auth/Register
///
/// Create an account. A taken username or a password that fails the policy
/// is a 400 carrying the service message.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<AuthResult>> {
    let result = state.auth.register(&input).await?;
    if !result.success {
        return Err(AppError::BadRequest(result.message));
    }
    Ok(Json(result))
}

/// POST /api/Auth/Login
///
/// Authenticate with username + password and receive a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResult>> {
    let result = state.auth.login(&input).await?;
    if !result.success {
        return Err(AppError::Core(CoreError::Unauthorized(result.message)));
    }
    Ok(Json(result))
}
