//! Handlers for the `/Movies` resource.
//!
//! Every route requires a bearer token. Service-level absence (`None` /
//! `false`) becomes a 404 here.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use cinereview_core::error::CoreError;
use cinereview_core::movie::{MovieQuery, DEFAULT_TOP_RATED_COUNT};
use cinereview_core::types::DbId;

use crate::dto::movie::{MovieQueryParams, MovieReadDto, MovieWriteRequest, TopRatedParams};
use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::handlers::location;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/Movies/GetAllMovies
///
/// Every movie in repository order. An empty catalog is an empty list.
pub async fn get_all(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovieReadDto>>> {
    Ok(Json(state.movies.get_all().await?))
}

/// GET /api/Movies/GetAllMoviesWithQuery?Name=&SortBy=&IsDescending=&PageNumber=&PageSize=
pub async fn get_all_with_query(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MovieQueryParams>,
) -> AppResult<Json<Vec<MovieReadDto>>> {
    let query = MovieQuery::from(params);
    tracing::debug!(?query, "Querying movies");
    Ok(Json(state.movies.get_all_with_query(&query).await?))
}

/// GET /api/Movies/GetById/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<MovieReadDto>> {
    let movie = state.movies.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(movie))
}

/// GET /api/Movies/GetTopRatedMovies?count=
///
/// `count` defaults to 10; negative counts yield an empty list.
pub async fn get_top_rated(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TopRatedParams>,
) -> AppResult<Json<Vec<MovieReadDto>>> {
    let count = params.count.unwrap_or(DEFAULT_TOP_RATED_COUNT);
    Ok(Json(state.movies.get_top_rated(count).await?))
}

/// GET /api/Movies/GetMoviesByYear/{year}
pub async fn get_by_year(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiPath(year): ApiPath<i32>,
) -> AppResult<Json<Vec<MovieReadDto>>> {
    Ok(Json(state.movies.get_by_year(year).await?))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/Movies/AddMovie
///
/// Returns 201 with the created movie and a `Location` pointing at `GetById`.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<MovieWriteRequest>,
) -> AppResult<(StatusCode, HeaderMap, Json<MovieReadDto>)> {
    let movie = state.movies.create(input.into()).await?;
    tracing::info!(movie_id = movie.id, user_id = user.user_id, "Movie added via API");

    let headers = location(format!("/api/Movies/GetById/{}", movie.id));
    Ok((StatusCode::CREATED, headers, Json(movie)))
}

/// PUT /api/Movies/UpdateMovie/{id}
///
/// Full replace of title, description, and release year.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<MovieWriteRequest>,
) -> AppResult<StatusCode> {
    if !state.movies.update(id, input.into()).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/Movies/DeleteMovie/{id}
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if !state.movies.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
