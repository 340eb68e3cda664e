//! Route definitions for the `/Movies` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Routes mounted at `/Movies`. All require a bearer token.
///
/// ```text
/// GET    /GetAllMovies             -> get_all
/// GET    /GetAllMoviesWithQuery    -> get_all_with_query
/// GET    /GetById/{id}             -> get_by_id
/// GET    /GetTopRatedMovies        -> get_top_rated
/// GET    /GetMoviesByYear/{year}   -> get_by_year
/// POST   /AddMovie                 -> create
/// PUT    /UpdateMovie/{id}         -> update
/// DELETE /DeleteMovie/{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/GetAllMovies", get(movies::get_all))
        .route("/GetAllMoviesWithQuery", get(movies::get_all_with_query))
        .route("/GetById/{id}", get(movies::get_by_id))
        .route("/GetTopRatedMovies", get(movies::get_top_rated))
        .route("/GetMoviesByYear/{year}", get(movies::get_by_year))
        .route("/AddMovie", post(movies::create))
        .route("/UpdateMovie/{id}", put(movies::update))
        .route("/DeleteMovie/{id}", delete(movies::delete))
}
