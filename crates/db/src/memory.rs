//! Process-local store implementing every repository trait.
//!
//! Backs the service and HTTP tests without a PostgreSQL instance. Semantics
//! follow the PostgreSQL repositories: ascending id order, unique usernames,
//! cascading movie deletes, and catalog queries via
//! [`cinereview_core::movie::apply_query`]. Review inserts do not check that
//! the movie exists.

use async_trait::async_trait;
use chrono::Utc;
use cinereview_core::movie::{apply_query, top_rated, MovieQuery};
use cinereview_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::movie::{CreateMovie, Movie, MovieWithReviews, UpdateMovie};
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::models::user::{CreateUser, User};
use crate::repositories::{MovieRepository, ReviewRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    movies: Vec<Movie>,
    reviews: Vec<Review>,
    last_user_id: DbId,
    last_movie_id: DbId,
    last_review_id: DbId,
}

impl Tables {
    fn with_reviews(&self, movie: &Movie) -> MovieWithReviews {
        MovieWithReviews {
            movie: movie.clone(),
            reviews: self
                .reviews
                .iter()
                .filter(|r| r.movie_id == movie.id)
                .cloned()
                .collect(),
        }
    }

    fn all_with_reviews(&self) -> Vec<MovieWithReviews> {
        self.movies.iter().map(|m| self.with_reviews(m)).collect()
    }

    fn username(&self, user_id: DbId) -> String {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }
}

/// Usernames compare the way the `lower(username)` index does.
fn same_username(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn next_id(last: &mut DbId) -> DbId {
    *last += 1;
    *last
}

/// In-memory implementation of [`UserRepository`], [`MovieRepository`], and
/// [`ReviewRepository`].
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| same_username(&u.username, username)).cloned())
    }

    async fn create(&self, input: &CreateUser) -> Result<Option<User>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| same_username(&u.username, &input.username)) {
            return Ok(None);
        }

        let user = User {
            id: next_id(&mut tables.last_user_id),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(Some(user))
    }
}

#[async_trait]
impl MovieRepository for MemoryStore {
    async fn list_with_reviews(&self) -> Result<Vec<MovieWithReviews>, sqlx::Error> {
        Ok(self.tables.read().await.all_with_reviews())
    }

    async fn query(&self, query: &MovieQuery) -> Result<Vec<MovieWithReviews>, sqlx::Error> {
        let all = self.tables.read().await.all_with_reviews();
        Ok(apply_query(all, query))
    }

    async fn find_with_reviews(&self, id: DbId) -> Result<Option<MovieWithReviews>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .movies
            .iter()
            .find(|m| m.id == id)
            .map(|m| tables.with_reviews(m)))
    }

    async fn top_rated(&self, count: i64) -> Result<Vec<MovieWithReviews>, sqlx::Error> {
        let all = self.tables.read().await.all_with_reviews();
        Ok(top_rated(all, count))
    }

    async fn list_by_year(&self, year: i32) -> Result<Vec<MovieWithReviews>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .movies
            .iter()
            .filter(|m| m.release_year == year)
            .map(|m| tables.with_reviews(m))
            .collect())
    }

    async fn create(&self, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let movie = Movie {
            id: next_id(&mut tables.last_movie_id),
            title: input.title.clone(),
            description: input.description.clone(),
            release_year: input.release_year,
            created_at: now,
            updated_at: now,
        };
        tables.movies.push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: DbId, input: &UpdateMovie) -> Result<Option<Movie>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let Some(movie) = tables.movies.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };

        movie.title = input.title.clone();
        movie.description = input.description.clone();
        movie.release_year = input.release_year;
        movie.updated_at = Utc::now();
        Ok(Some(movie.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let before = tables.movies.len();
        tables.movies.retain(|m| m.id != id);
        if tables.movies.len() == before {
            return Ok(false);
        }

        tables.reviews.retain(|r| r.movie_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn list_for_movie(&self, movie_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.movie_id == movie_id)
            .cloned()
            .collect())
    }

    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, user_id: DbId, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let review = Review {
            id: next_id(&mut tables.last_review_id),
            content: input.content.clone(),
            rating: input.rating,
            movie_id: input.movie_id,
            user_id,
            user_name: tables.username(user_id),
            created_at: now,
            updated_at: now,
        };
        tables.reviews.push(review.clone());
        Ok(review)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let Some(review) = tables.reviews.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        review.content = input.content.clone();
        review.rating = input.rating;
        review.updated_at = Utc::now();
        Ok(Some(review.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let before = tables.reviews.len();
        tables.reviews.retain(|r| r.id != id);
        Ok(tables.reviews.len() < before)
    }
}
