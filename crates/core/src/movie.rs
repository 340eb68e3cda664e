//! Movie catalog query semantics and read-time rating aggregation.
//!
//! Both the PostgreSQL repository (which pushes the query down into SQL) and
//! the in-memory store follow the rules defined here:
//!
//! 1. Filter: case-insensitive substring match on the title.
//! 2. Sort: by title or release year, ascending unless `descending` is set.
//!    An unrecognised sort key means no sort (backend order, ascending id).
//! 3. Paginate: skip `(number - 1) * size`, take `size`.

use std::cmp::Ordering;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Page size used when the caller does not supply one (or supplies `<= 0`).
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound for a single page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Number of movies returned by the top-rated listing when no count is given.
pub const DEFAULT_TOP_RATED_COUNT: i64 = 10;

/* --------------------------------------------------------------------------
Query types
-------------------------------------------------------------------------- */

/// Sortable movie attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    ReleaseYear,
}

impl SortField {
    /// Parse a client-supplied sort key (`name` or `releaseYear`, any case).
    ///
    /// Returns `None` for anything else; callers treat that as "no sort".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Title),
            "releaseyear" => Some(Self::ReleaseYear),
            _ => None,
        }
    }
}

/// A clamped, 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    /// Build a page from raw client input.
    ///
    /// - `number < 1` is clamped to 1.
    /// - `size < 1` falls back to [`DEFAULT_PAGE_SIZE`].
    /// - `size > MAX_PAGE_SIZE` is clamped to [`MAX_PAGE_SIZE`].
    pub fn new(number: Option<i64>, size: Option<i64>) -> Self {
        let number = number.unwrap_or(DEFAULT_PAGE_NUMBER).max(1);
        let size = match size {
            Some(size) if size >= 1 => size.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };
        Self { number, size }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Filter, sort, and pagination options for the movie listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    /// Title substring; `None` disables filtering.
    pub name: Option<String>,
    pub sort_by: Option<SortField>,
    pub descending: bool,
    pub page: Page,
}

impl MovieQuery {
    /// Normalise raw query-string input into a [`MovieQuery`].
    ///
    /// Blank names are treated as absent and unknown sort keys are dropped.
    pub fn new(
        name: Option<String>,
        sort_by: Option<&str>,
        descending: bool,
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            sort_by: sort_by.and_then(SortField::parse),
            descending,
            page: Page::new(page_number, page_size),
        }
    }
}

/* --------------------------------------------------------------------------
Aggregation
-------------------------------------------------------------------------- */

/// Review statistics derived from the current set of ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub review_count: i64,
    /// Arithmetic mean of all ratings, `0.0` when there are none.
    pub average_rating: f64,
}

impl RatingSummary {
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let (count, sum) = ratings
            .into_iter()
            .fold((0_i64, 0_i64), |(count, sum), r| (count + 1, sum + i64::from(r)));

        let average_rating = if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        };

        Self {
            review_count: count,
            average_rating,
        }
    }
}

/// A movie as seen by the catalog rules.
pub trait CatalogEntry {
    fn title(&self) -> &str;
    fn release_year(&self) -> i32;
    fn rating_summary(&self) -> RatingSummary;
}

/* --------------------------------------------------------------------------
Query application
-------------------------------------------------------------------------- */

/// Apply filter, sort, and pagination (in that order) to an in-memory list.
///
/// Sorting is stable, so entries with equal keys keep their input order.
pub fn apply_query<T: CatalogEntry>(entries: Vec<T>, query: &MovieQuery) -> Vec<T> {
    let mut entries: Vec<T> = match &query.name {
        Some(name) => {
            let needle = name.to_lowercase();
            entries
                .into_iter()
                .filter(|e| e.title().to_lowercase().contains(&needle))
                .collect()
        }
        None => entries,
    };

    if let Some(field) = query.sort_by {
        entries.sort_by(|a, b| {
            let ordering = compare_by(field, a, b);
            if query.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    let skip = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(query.page.size).unwrap_or(0);
    entries.into_iter().skip(skip).take(take).collect()
}

/// Order entries by average rating (highest first) and keep the first `count`.
///
/// Entries without reviews rank as rating 0. Ties keep their input order.
pub fn top_rated<T: CatalogEntry>(entries: Vec<T>, count: i64) -> Vec<T> {
    let mut ranked: Vec<(f64, T)> = entries
        .into_iter()
        .map(|e| (e.rating_summary().average_rating, e))
        .collect();
    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));

    let take = usize::try_from(count.max(0)).unwrap_or(0);
    ranked.into_iter().take(take).map(|(_, e)| e).collect()
}

fn compare_by<T: CatalogEntry>(field: SortField, a: &T, b: &T) -> Ordering {
    match field {
        SortField::Title => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
        SortField::ReleaseYear => a.release_year().cmp(&b.release_year()),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
