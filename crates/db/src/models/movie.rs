//! Movie entity model and DTOs.

use cinereview_core::movie::{CatalogEntry, RatingSummary};
use cinereview_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::review::Review;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A movie together with every review currently attached to it.
#[derive(Debug, Clone)]
pub struct MovieWithReviews {
    pub movie: Movie,
    pub reviews: Vec<Review>,
}

impl CatalogEntry for MovieWithReviews {
    fn title(&self) -> &str {
        &self.movie.title
    }

    fn release_year(&self) -> i32 {
        self.movie.release_year
    }

    fn rating_summary(&self) -> RatingSummary {
        RatingSummary::from_ratings(self.reviews.iter().map(|r| r.rating))
    }
}

/// DTO for creating a movie.
#[derive(Debug, Clone)]
pub struct CreateMovie {
    pub title: String,
    pub description: String,
    pub release_year: i32,
}

/// DTO for a full replace of a movie's editable fields.
#[derive(Debug, Clone)]
pub struct UpdateMovie {
    pub title: String,
    pub description: String,
    pub release_year: i32,
}
