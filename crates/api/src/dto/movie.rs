use cinereview_core::movie::{CatalogEntry, MovieQuery};
use cinereview_core::types::DbId;
use cinereview_db::models::movie::{CreateMovie, MovieWithReviews, UpdateMovie};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Request body for `AddMovie` and `UpdateMovie` (full replace).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieWriteRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters."))]
    pub title: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters."))]
    pub description: String,
    #[validate(range(min = 1800, max = 2025, message = "Release year must be between 1800 and 2025."))]
    pub release_year: i32,
}

impl From<MovieWriteRequest> for CreateMovie {
    fn from(req: MovieWriteRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            release_year: req.release_year,
        }
    }
}

impl From<MovieWriteRequest> for UpdateMovie {
    fn from(req: MovieWriteRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            release_year: req.release_year,
        }
    }
}

/// Query string of `GetAllMoviesWithQuery`.
///
/// Names are accepted in PascalCase (`PageNumber`) and camelCase (`pageNumber`).
#[derive(Debug, Default, Deserialize)]
pub struct MovieQueryParams {
    #[serde(rename = "Name", alias = "name")]
    pub name: Option<String>,
    #[serde(rename = "SortBy", alias = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(
        rename = "IsDescending",
        alias = "isDescending",
        default,
        deserialize_with = "lenient_bool"
    )]
    pub is_descending: bool,
    #[serde(rename = "PageNumber", alias = "pageNumber")]
    pub page_number: Option<i64>,
    #[serde(rename = "PageSize", alias = "pageSize")]
    pub page_size: Option<i64>,
}

impl From<MovieQueryParams> for MovieQuery {
    fn from(params: MovieQueryParams) -> Self {
        MovieQuery::new(
            params.name,
            params.sort_by.as_deref(),
            params.is_descending,
            params.page_number,
            params.page_size,
        )
    }
}

/// Query string of `GetTopRatedMovies`.
#[derive(Debug, Default, Deserialize)]
pub struct TopRatedParams {
    #[serde(alias = "Count")]
    pub count: Option<i64>,
}

/// Accept `true`/`false` in any letter case.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(serde::de::Error::custom(format!(
            "expected `true` or `false`, got `{raw}`"
        )))
    }
}

/// A movie with its derived review statistics and external rating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieReadDto {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub review_count: i64,
    pub average_rating: f64,
    /// IMDb rating as reported by OMDb, or `"N/A"`.
    pub imdb_rating: String,
}

impl MovieReadDto {
    pub fn from_entry(entry: MovieWithReviews, imdb_rating: String) -> Self {
        let summary = entry.rating_summary();
        let movie = entry.movie;
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            release_year: movie.release_year,
            review_count: summary.review_count,
            average_rating: summary.average_rating,
            imdb_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use cinereview_core::movie::SortField;

    use super::*;

    fn try_parse(qs: &str) -> Option<MovieQueryParams> {
        let uri: axum::http::Uri = format!("/movies?{qs}").parse().ok()?;
        axum::extract::Query::<MovieQueryParams>::try_from_uri(&uri)
            .ok()
            .map(|q| q.0)
    }

    fn parse(qs: &str) -> MovieQueryParams {
        try_parse(qs).expect("query string should parse")
    }

    #[test]
    fn pascal_case_names_are_accepted() {
        let query: MovieQuery =
            parse("Name=matrix&SortBy=releaseYear&IsDescending=True&PageNumber=2&PageSize=5")
                .into();
        assert_eq!(query.name.as_deref(), Some("matrix"));
        assert_eq!(query.sort_by, Some(SortField::ReleaseYear));
        assert!(query.descending);
        assert_eq!((query.page.number, query.page.size), (2, 5));
    }

    #[test]
    fn camel_case_names_are_accepted() {
        let query: MovieQuery = parse("name=in&sortBy=name&isDescending=false").into();
        assert_eq!(query.name.as_deref(), Some("in"));
        assert_eq!(query.sort_by, Some(SortField::Title));
        assert!(!query.descending);
    }

    #[test]
    fn empty_query_uses_defaults() {
        let query: MovieQuery = parse("").into();
        assert_eq!(query, MovieQuery::default());
    }

    #[test]
    fn invalid_flag_is_rejected() {
        assert!(try_parse("IsDescending=maybe").is_none());
    }

    #[test]
    fn write_request_limits() {
        let valid = MovieWriteRequest {
            title: "Heat".to_string(),
            description: String::new(),
            release_year: 1995,
        };
        assert!(valid.validate().is_ok());

        let too_old = MovieWriteRequest {
            release_year: 1799,
            ..valid.clone()
        };
        assert!(too_old.validate().is_err());

        let untitled = MovieWriteRequest {
            title: String::new(),
            ..valid
        };
        assert!(untitled.validate().is_err());
    }
}
