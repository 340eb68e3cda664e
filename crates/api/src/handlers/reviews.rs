//! Handlers for the `/Reviews` resource.
//!
//! The review author is always the caller's token subject; request bodies
//! never name a user.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use cinereview_core::error::CoreError;
use cinereview_core::types::DbId;

use crate::dto::review::{ReviewCreateRequest, ReviewDto, ReviewUpdateRequest};
use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ValidatedJson};
use crate::handlers::location;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/Reviews/GetById/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ReviewDto>> {
    let review = state
        .reviews
        .get_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;
    Ok(Json(review))
}

/// GET /api/Reviews/GetByMovieId/{movieId}
pub async fn get_by_movie_id(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<DbId>,
) -> AppResult<Json<Vec<ReviewDto>>> {
    Ok(Json(state.reviews.get_by_movie_id(movie_id).await?))
}

/// GET /api/Reviews/GetByUserId/{userId}
pub async fn get_by_user_id(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<DbId>,
) -> AppResult<Json<Vec<ReviewDto>>> {
    Ok(Json(state.reviews.get_by_user_id(user_id).await?))
}

/// POST /api/Reviews/AddReview
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ReviewCreateRequest>,
) -> AppResult<(StatusCode, HeaderMap, Json<ReviewDto>)> {
    let review = state.reviews.add(input.into(), user.user_id).await?;

    let headers = location(format!("/api/Reviews/GetById/{}", review.id));
    Ok((StatusCode::CREATED, headers, Json(review)))
}

/// PUT /api/Reviews/UpdateReview/{id}
///
/// 403 unless the caller wrote the review (also when it does not exist).
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<ReviewUpdateRequest>,
) -> AppResult<StatusCode> {
    state.reviews.update(id, input.into(), user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/Reviews/DeleteReview/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    state.reviews.delete(id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
