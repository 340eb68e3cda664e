use cinereview_core::types::DbId;
use cinereview_db::models::review::{CreateReview, Review, UpdateReview};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `AddReview`. The author is taken from the token.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreateRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be between 1 and 2000 characters."))]
    pub content: String,
    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10."))]
    pub rating: i32,
    pub movie_id: DbId,
}

impl From<ReviewCreateRequest> for CreateReview {
    fn from(req: ReviewCreateRequest) -> Self {
        Self {
            content: req.content,
            rating: req.rating,
            movie_id: req.movie_id,
        }
    }
}

/// Request body for `UpdateReview`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdateRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be between 1 and 2000 characters."))]
    pub content: String,
    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10."))]
    pub rating: i32,
}

impl From<ReviewUpdateRequest> for UpdateReview {
    fn from(req: ReviewUpdateRequest) -> Self {
        Self {
            content: req.content,
            rating: req.rating,
        }
    }
}

/// A review with its author's username.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: DbId,
    pub content: String,
    pub rating: i32,
    pub movie_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            content: review.content,
            rating: review.rating,
            movie_id: review.movie_id,
            user_id: review.user_id,
            user_name: review.user_name,
        }
    }
}
