//! Review reads and author-only mutations.

use std::sync::Arc;

use cinereview_core::error::CoreError;
use cinereview_core::review::{ensure_author, ReviewAction};
use cinereview_core::types::DbId;
use cinereview_db::models::review::{CreateReview, UpdateReview};
use cinereview_db::repositories::ReviewRepository;

use crate::dto::review::ReviewDto;
use crate::error::AppResult;

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<Option<ReviewDto>> {
        Ok(self.reviews.find_by_id(id).await?.map(ReviewDto::from))
    }

    pub async fn get_by_movie_id(&self, movie_id: DbId) -> AppResult<Vec<ReviewDto>> {
        let reviews = self.reviews.list_for_movie(movie_id).await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }

    pub async fn get_by_user_id(&self, user_id: DbId) -> AppResult<Vec<ReviewDto>> {
        let reviews = self.reviews.list_for_user(user_id).await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }

    /// Store a review authored by `author_id`.
    ///
    /// The movie is not looked up here; the backing store decides what an
    /// unknown `movie_id` means.
    pub async fn add(&self, input: CreateReview, author_id: DbId) -> AppResult<ReviewDto> {
        let review = self.reviews.create(author_id, &input).await?;
        tracing::info!(
            review_id = review.id,
            movie_id = review.movie_id,
            user_id = author_id,
            "Review created"
        );
        Ok(review.into())
    }

    /// Replace content and rating. Only the author may do this.
    pub async fn update(&self, id: DbId, input: UpdateReview, caller_id: DbId) -> AppResult<()> {
        self.authorize(id, caller_id, ReviewAction::Edit).await?;

        if self.reviews.update(id, &input).await?.is_none() {
            return Err(CoreError::NotFound { entity: "Review", id }.into());
        }
        tracing::info!(review_id = id, user_id = caller_id, "Review updated");
        Ok(())
    }

    /// Remove a review. Only the author may do this.
    pub async fn delete(&self, id: DbId, caller_id: DbId) -> AppResult<()> {
        self.authorize(id, caller_id, ReviewAction::Delete).await?;

        if !self.reviews.delete(id).await? {
            return Err(CoreError::NotFound { entity: "Review", id }.into());
        }
        tracing::info!(review_id = id, user_id = caller_id, "Review deleted");
        Ok(())
    }

    async fn authorize(&self, id: DbId, caller_id: DbId, action: ReviewAction) -> AppResult<()> {
        let author = self.reviews.find_by_id(id).await?.map(|r| r.user_id);
        ensure_author(author, caller_id, action)?;
        Ok(())
    }
}
