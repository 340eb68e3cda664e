//! REST client for the OMDb title lookup endpoint.
//!
//! Wraps `GET {base_url}?t={title}&apikey={key}` using [`reqwest`]. OMDb
//! answers "not found" with HTTP 200 and `{"Response": "False", ...}`, so the
//! body has to be inspected even on success.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{RatingGateway, NOT_AVAILABLE};

/// Public OMDb endpoint used when `OMDB_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Transport timeout for a single lookup. Lookups are never retried.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for the OMDb API.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// Base URL, e.g. `https://www.omdbapi.com/`.
    pub base_url: String,
    /// API key. When absent every lookup short-circuits to `"N/A"`.
    pub api_key: Option<String>,
}

impl OmdbConfig {
    /// Load OMDb configuration from environment variables.
    ///
    /// | Env Var         | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `OMDB_BASE_URL` | no       | `https://www.omdbapi.com/` |
    /// | `OMDB_API_KEY`  | no       | --                         |
    ///
    /// A blank API key is treated as absent.
    pub fn from_env() -> Self {
        let base_url = std::env::var("OMDB_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let api_key = std::env::var("OMDB_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Self { base_url, api_key }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from a single OMDb lookup.
#[derive(Debug, thiserror::Error)]
pub enum OmdbError {
    /// The HTTP request failed (network, DNS, TLS, timeout, or body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// OMDb returned a non-2xx status code.
    #[error("OMDb API returned HTTP {status}")]
    ApiError { status: u16 },
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Subset of the OMDb title response that the catalog uses.
#[derive(Debug, Deserialize)]
struct TitleResponse {
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    /// `"True"` or `"False"`.
    #[serde(rename = "Response")]
    response: Option<String>,
}

/// HTTP client for the OMDb API.
pub struct OmdbClient {
    client: reqwest::Client,
    config: OmdbConfig,
}

impl OmdbClient {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(config: OmdbConfig) -> Result<Self, OmdbError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    /// Look up a title and return its IMDb rating.
    ///
    /// Returns `Ok(None)` when OMDb does not know the title or has no rating.
    pub async fn fetch_rating(
        &self,
        title: &str,
        api_key: &str,
    ) -> Result<Option<String>, OmdbError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("t", title), ("apikey", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmdbError::ApiError {
                status: status.as_u16(),
            });
        }

        let body: TitleResponse = response.json().await?;
        if body
            .response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"))
        {
            return Ok(None);
        }

        Ok(body.imdb_rating.filter(|r| !r.trim().is_empty()))
    }
}

#[async_trait]
impl RatingGateway for OmdbClient {
    async fn imdb_rating(&self, title: &str) -> String {
        if title.trim().is_empty() {
            return NOT_AVAILABLE.to_string();
        }

        let Some(api_key) = self.config.api_key.as_deref() else {
            return NOT_AVAILABLE.to_string();
        };

        match self.fetch_rating(title, api_key).await {
            Ok(Some(rating)) => rating,
            Ok(None) => {
                tracing::debug!(title, "OMDb has no rating for title");
                NOT_AVAILABLE.to_string()
            }
            Err(e) => {
                tracing::warn!(title, error = %e, "OMDb lookup failed");
                NOT_AVAILABLE.to_string()
            }
        }
    }
}
