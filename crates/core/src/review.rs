//! Review ownership rules.
//!
//! Only the author of a review may edit or delete it. A missing review and a
//! review owned by someone else are indistinguishable to the caller: both
//! produce the same [`CoreError::Forbidden`].

use crate::error::CoreError;
use crate::types::DbId;

/// The mutation being attempted, used to phrase the denial message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Edit,
    Delete,
}

impl ReviewAction {
    fn verb(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// Check that `caller` authored the review.
///
/// `author` is the stored `user_id` of the review, or `None` if the review
/// does not exist.
pub fn ensure_author(
    author: Option<DbId>,
    caller: DbId,
    action: ReviewAction,
) -> Result<(), CoreError> {
    match author {
        Some(author) if author == caller => Ok(()),
        _ => Err(CoreError::Forbidden(format!(
            "You cannot {} this review.",
            action.verb()
        ))),
    }
}
