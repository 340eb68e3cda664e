pub mod auth;
pub mod health;
pub mod movies;
pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /Auth/Register                               register (public)
/// /Auth/Login                                  login (public)
///
/// /Movies/GetAllMovies                         list all (auth required)
/// /Movies/GetAllMoviesWithQuery                filter, sort, paginate
/// /Movies/GetById/{id}                         get one
/// /Movies/GetTopRatedMovies                    top by mean rating (?count=)
/// /Movies/GetMoviesByYear/{year}               exact year match
/// /Movies/AddMovie                             create (POST)
/// /Movies/UpdateMovie/{id}                     replace (PUT)
/// /Movies/DeleteMovie/{id}                     delete (DELETE)
///
/// /Reviews/GetById/{id}                        get one (auth required)
/// /Reviews/GetByMovieId/{movieId}              reviews of a movie
/// /Reviews/GetByUserId/{userId}                reviews by a user
/// /Reviews/AddReview                           create as caller (POST)
/// /Reviews/UpdateReview/{id}                   author only (PUT)
/// /Reviews/DeleteReview/{id}                   author only (DELETE)
/// ```
///
/// Paths are matched case-sensitively.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration and login.
        .nest("/Auth", auth::router())
        // Movie catalog.
        .nest("/Movies", movies::router())
        // Reviews and ownership-checked mutations.
        .nest("/Reviews", reviews::router())
}
