//! Repository for the `movies` table.
//!
//! Listings load movie rows first and then attach all of their reviews with a
//! single `movie_id = ANY(..)` query. Review aggregates are never stored.

use std::collections::HashMap;

use async_trait::async_trait;
use cinereview_core::movie::{MovieQuery, SortField};
use cinereview_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie, MovieWithReviews, UpdateMovie};
use crate::models::review::Review;
use crate::repositories::review_repo::ReviewRepo;
use crate::repositories::MovieRepository;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, release_year, created_at, updated_at";

/// Same columns qualified with the `m` alias, for joins.
const QUALIFIED_COLUMNS: &str =
    "m.id, m.title, m.description, m.release_year, m.created_at, m.updated_at";

/// PostgreSQL-backed [`MovieRepository`].
#[derive(Clone)]
pub struct MovieRepo {
    pool: PgPool,
}

impl MovieRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach reviews to already-loaded movie rows, preserving row order.
    async fn attach_reviews(
        &self,
        movies: Vec<Movie>,
    ) -> Result<Vec<MovieWithReviews>, sqlx::Error> {
        if movies.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = movies.iter().map(|m| m.id).collect();
        let reviews = ReviewRepo::list_for_movies(&self.pool, &ids).await?;

        let mut by_movie: HashMap<DbId, Vec<Review>> = HashMap::new();
        for review in reviews {
            by_movie.entry(review.movie_id).or_default().push(review);
        }

        Ok(movies
            .into_iter()
            .map(|movie| {
                let reviews = by_movie.remove(&movie.id).unwrap_or_default();
                MovieWithReviews { movie, reviews }
            })
            .collect())
    }
}

/// Build the `ORDER BY` clause for a catalog query.
///
/// Ties (and the unsorted case) fall back to ascending id so that paging is
/// deterministic.
fn order_clause(query: &MovieQuery) -> String {
    let direction = if query.descending { "DESC" } else { "ASC" };
    match query.sort_by {
        Some(SortField::Title) => format!("ORDER BY lower(title) {direction}, id"),
        Some(SortField::ReleaseYear) => format!("ORDER BY release_year {direction}, id"),
        None => "ORDER BY id".to_string(),
    }
}

#[async_trait]
impl MovieRepository for MovieRepo {
    async fn list_with_reviews(&self) -> Result<Vec<MovieWithReviews>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id");
        let movies = sqlx::query_as::<_, Movie>(&query)
            .fetch_all(&self.pool)
            .await?;
        self.attach_reviews(movies).await
    }

    async fn query(&self, query: &MovieQuery) -> Result<Vec<MovieWithReviews>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE ($1::TEXT IS NULL OR strpos(lower(title), lower($1)) > 0)
             {order}
             LIMIT $2 OFFSET $3",
            order = order_clause(query),
        );
        let movies = sqlx::query_as::<_, Movie>(&sql)
            .bind(query.name.as_deref())
            .bind(query.page.size)
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await?;
        self.attach_reviews(movies).await
    }

    async fn find_with_reviews(&self, id: DbId) -> Result<Option<MovieWithReviews>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match movie {
            Some(movie) => Ok(self.attach_reviews(vec![movie]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn top_rated(&self, count: i64) -> Result<Vec<MovieWithReviews>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}
             FROM movies m
             LEFT JOIN reviews r ON r.movie_id = m.id
             GROUP BY m.id
             ORDER BY COALESCE(AVG(r.rating), 0) DESC, m.id
             LIMIT $1"
        );
        let movies = sqlx::query_as::<_, Movie>(&query)
            .bind(count.max(0))
            .fetch_all(&self.pool)
            .await?;
        self.attach_reviews(movies).await
    }

    async fn list_by_year(&self, year: i32) -> Result<Vec<MovieWithReviews>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE release_year = $1 ORDER BY id");
        let movies = sqlx::query_as::<_, Movie>(&query)
            .bind(year)
            .fetch_all(&self.pool)
            .await?;
        self.attach_reviews(movies).await
    }

    async fn create(&self, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, description, release_year)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.release_year)
            .fetch_one(&self.pool)
            .await
    }

    async fn update(&self, id: DbId, input: &UpdateMovie) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = $2,
                description = $3,
                release_year = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.release_year)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        // Reviews go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
