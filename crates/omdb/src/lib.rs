//! External rating gateway backed by the OMDb HTTP API.
//!
//! The gateway is best-effort: [`RatingGateway::imdb_rating`] never fails.
//! Any problem (empty title, missing API key, transport error, malformed or
//! "not found" response) resolves to [`NOT_AVAILABLE`].

use async_trait::async_trait;

pub mod client;

pub use client::{OmdbClient, OmdbConfig, OmdbError};

/// Sentinel returned whenever no rating can be obtained.
pub const NOT_AVAILABLE: &str = "N/A";

/// Best-effort lookup of a third-party rating by movie title.
#[async_trait]
pub trait RatingGateway: Send + Sync {
    /// The IMDb rating for `title` (e.g. `"8.8"`), or [`NOT_AVAILABLE`].
    async fn imdb_rating(&self, title: &str) -> String;
}
