//! Repository for the `reviews` table.
//!
//! Every read joins `users` so the author's username travels with the row.

use async_trait::async_trait;
use cinereview_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::repositories::ReviewRepository;

/// Column list for a review aliased `r` joined with its author aliased `u`.
const COLUMNS: &str = "r.id, r.content, r.rating, r.movie_id, r.user_id, \
                        u.username AS user_name, r.created_at, r.updated_at";

/// PostgreSQL-backed [`ReviewRepository`].
#[derive(Clone)]
pub struct ReviewRepo {
    pool: PgPool,
}

impl ReviewRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the reviews of several movies at once, ordered by review id.
    pub(crate) async fn list_for_movies(
        pool: &PgPool,
        movie_ids: &[DbId],
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.movie_id = ANY($1)
             ORDER BY r.id"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(movie_ids)
            .fetch_all(pool)
            .await
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepo {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_for_movie(&self, movie_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        Self::list_for_movies(&self.pool, &[movie_id]).await
    }

    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.user_id = $1
             ORDER BY r.id"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn create(&self, user_id: DbId, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "WITH r AS (
                 INSERT INTO reviews (content, rating, movie_id, user_id)
                 VALUES ($1, $2, $3, $4)
                 RETURNING *
             )
             SELECT {COLUMNS} FROM r JOIN users u ON u.id = r.user_id"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.content)
            .bind(input.rating)
            .bind(input.movie_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "WITH r AS (
                 UPDATE reviews SET content = $2, rating = $3, updated_at = NOW()
                 WHERE id = $1
                 RETURNING *
             )
             SELECT {COLUMNS} FROM r JOIN users u ON u.id = r.user_id"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(&input.content)
            .bind(input.rating)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
