//! Repository traits and their PostgreSQL implementations.
//!
//! Services depend on the traits only, so the same service code runs against
//! [`UserRepo`]/[`MovieRepo`]/[`ReviewRepo`] in production and against
//! [`crate::memory::MemoryStore`] in tests.

use async_trait::async_trait;
use cinereview_core::movie::MovieQuery;
use cinereview_core::types::DbId;

use crate::models::movie::{CreateMovie, Movie, MovieWithReviews, UpdateMovie};
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::models::user::{CreateUser, User};

pub mod movie_repo;
pub mod review_repo;
pub mod user_repo;

pub use movie_repo::MovieRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;

/// Credential storage: user identity plus the hashed password.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by username, ignoring case.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;

    /// Insert a new user.
    ///
    /// Returns `None` when the username is already taken in any casing.
    async fn create(&self, input: &CreateUser) -> Result<Option<User>, sqlx::Error>;
}

/// Movie storage and catalog queries. Every listing carries the reviews.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// All movies in ascending id order.
    async fn list_with_reviews(&self) -> Result<Vec<MovieWithReviews>, sqlx::Error>;

    /// Filtered, sorted, and paginated listing (see [`cinereview_core::movie`]).
    async fn query(&self, query: &MovieQuery) -> Result<Vec<MovieWithReviews>, sqlx::Error>;

    async fn find_with_reviews(&self, id: DbId) -> Result<Option<MovieWithReviews>, sqlx::Error>;

    /// Up to `count` movies ordered by average rating, highest first.
    async fn top_rated(&self, count: i64) -> Result<Vec<MovieWithReviews>, sqlx::Error>;

    async fn list_by_year(&self, year: i32) -> Result<Vec<MovieWithReviews>, sqlx::Error>;

    async fn create(&self, input: &CreateMovie) -> Result<Movie, sqlx::Error>;

    /// Replace title, description, and release year.
    ///
    /// Returns `None` if no row with the given `id` exists.
    async fn update(&self, id: DbId, input: &UpdateMovie) -> Result<Option<Movie>, sqlx::Error>;

    /// Delete a movie and its reviews. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// Review storage.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Review>, sqlx::Error>;

    async fn list_for_movie(&self, movie_id: DbId) -> Result<Vec<Review>, sqlx::Error>;

    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Review>, sqlx::Error>;

    /// Insert a review authored by `user_id`.
    async fn create(&self, user_id: DbId, input: &CreateReview) -> Result<Review, sqlx::Error>;

    /// Replace content and rating. Returns `None` if the review does not exist.
    async fn update(&self, id: DbId, input: &UpdateReview)
        -> Result<Option<Review>, sqlx::Error>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}
