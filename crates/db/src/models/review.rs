//! Review entity model and DTOs.

use cinereview_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `reviews` table joined with the author's username.
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: DbId,
    pub content: String,
    /// 1 to 10 inclusive.
    pub rating: i32,
    pub movie_id: DbId,
    /// Author. Never changes after creation.
    pub user_id: DbId,
    pub user_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a review. The author comes from the caller's identity.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub content: String,
    pub rating: i32,
    pub movie_id: DbId,
}

/// DTO for replacing a review's content and rating.
#[derive(Debug, Clone)]
pub struct UpdateReview {
    pub content: String,
    pub rating: i32,
}
