//! Route definitions for the `/Reviews` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/Reviews`. All require a bearer token.
///
/// ```text
/// GET    /GetById/{id}             -> get_by_id
/// GET    /GetByMovieId/{movieId}   -> get_by_movie_id
/// GET    /GetByUserId/{userId}     -> get_by_user_id
/// POST   /AddReview                -> create
/// PUT    /UpdateReview/{id}        -> update (author only)
/// DELETE /DeleteReview/{id}        -> delete (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/GetById/{id}", get(reviews::get_by_id))
        .route("/GetByMovieId/{movieId}", get(reviews::get_by_movie_id))
        .route("/GetByUserId/{userId}", get(reviews::get_by_user_id))
        .route("/AddReview", post(reviews::create))
        .route("/UpdateReview/{id}", put(reviews::update))
        .route("/DeleteReview/{id}", delete(reviews::delete))
}
