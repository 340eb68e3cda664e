//! Movie catalog reads and writes.
//!
//! Every read model is built from the movie's current reviews and enriched
//! with the external IMDb rating. Enrichment runs at most
//! [`MAX_CONCURRENT_LOOKUPS`] gateway calls at a time and keeps the
//! repository order. The gateway never fails, so neither does enrichment.

use std::sync::Arc;

use cinereview_core::movie::MovieQuery;
use cinereview_core::types::DbId;
use cinereview_db::models::movie::{CreateMovie, MovieWithReviews, UpdateMovie};
use cinereview_db::repositories::MovieRepository;
use cinereview_omdb::RatingGateway;
use futures::stream::{self, StreamExt};

use crate::dto::movie::MovieReadDto;
use crate::error::AppResult;

/// Upper bound on in-flight rating lookups per request.
pub const MAX_CONCURRENT_LOOKUPS: usize = 8;

pub struct MovieService {
    movies: Arc<dyn MovieRepository>,
    ratings: Arc<dyn RatingGateway>,
}

impl MovieService {
    pub fn new(movies: Arc<dyn MovieRepository>, ratings: Arc<dyn RatingGateway>) -> Self {
        Self { movies, ratings }
    }

    pub async fn get_all(&self) -> AppResult<Vec<MovieReadDto>> {
        let entries = self.movies.list_with_reviews().await?;
        Ok(self.enrich(entries).await)
    }

    /// Filter, sort, then paginate.
    pub async fn get_all_with_query(&self, query: &MovieQuery) -> AppResult<Vec<MovieReadDto>> {
        let entries = self.movies.query(query).await?;
        Ok(self.enrich(entries).await)
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<Option<MovieReadDto>> {
        match self.movies.find_with_reviews(id).await? {
            Some(entry) => Ok(Some(self.enrich_one(entry).await)),
            None => Ok(None),
        }
    }

    /// Highest mean rating first; movies without reviews count as 0.
    pub async fn get_top_rated(&self, count: i64) -> AppResult<Vec<MovieReadDto>> {
        let entries = self.movies.top_rated(count.max(0)).await?;
        Ok(self.enrich(entries).await)
    }

    pub async fn get_by_year(&self, year: i32) -> AppResult<Vec<MovieReadDto>> {
        let entries = self.movies.list_by_year(year).await?;
        Ok(self.enrich(entries).await)
    }

    pub async fn create(&self, input: CreateMovie) -> AppResult<MovieReadDto> {
        let movie = self.movies.create(&input).await?;
        tracing::info!(movie_id = movie.id, title = %movie.title, "Movie created");

        let entry = MovieWithReviews {
            movie,
            reviews: Vec::new(),
        };
        Ok(self.enrich_one(entry).await)
    }

    /// Returns `false` if the movie does not exist.
    pub async fn update(&self, id: DbId, input: UpdateMovie) -> AppResult<bool> {
        let updated = self.movies.update(id, &input).await?;
        if updated.is_some() {
            tracing::info!(movie_id = id, "Movie updated");
        }
        Ok(updated.is_some())
    }

    /// Returns `false` if the movie does not exist. Its reviews go with it.
    pub async fn delete(&self, id: DbId) -> AppResult<bool> {
        let deleted = self.movies.delete(id).await?;
        if deleted {
            tracing::info!(movie_id = id, "Movie deleted");
        }
        Ok(deleted)
    }

    async fn enrich_one(&self, entry: MovieWithReviews) -> MovieReadDto {
        let rating = self.ratings.imdb_rating(&entry.movie.title).await;
        MovieReadDto::from_entry(entry, rating)
    }

    async fn enrich(&self, entries: Vec<MovieWithReviews>) -> Vec<MovieReadDto> {
        stream::iter(entries)
            .map(|entry| self.enrich_one(entry))
            .buffered(MAX_CONCURRENT_LOOKUPS)
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use cinereview_db::memory::MemoryStore;
    use cinereview_db::models::review::CreateReview;
    use cinereview_db::models::user::CreateUser;
    use cinereview_db::repositories::{ReviewRepository, UserRepository};
    use cinereview_omdb::NOT_AVAILABLE;

    use super::*;

    /// Rates every title `"7.5"` except `"Unknown"`.
    struct FixedGateway;

    #[async_trait]
    impl RatingGateway for FixedGateway {
        async fn imdb_rating(&self, title: &str) -> String {
            if title == "Unknown" {
                NOT_AVAILABLE.to_string()
            } else {
                "7.5".to_string()
            }
        }
    }

    /// Records the highest number of concurrent lookups.
    #[derive(Default)]
    struct ConcurrencyProbe {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl RatingGateway for ConcurrencyProbe {
        async fn imdb_rating(&self, title: &str) -> String {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            title.to_string()
        }
    }

    fn movie(title: &str, year: i32) -> CreateMovie {
        CreateMovie {
            title: title.to_string(),
            description: format!("About {title}"),
            release_year: year,
        }
    }

    fn replacement(title: &str) -> UpdateMovie {
        UpdateMovie {
            title: title.to_string(),
            description: String::new(),
            release_year: 2010,
        }
    }

    async fn seeded() -> (Arc<MemoryStore>, MovieService) {
        let store = Arc::new(MemoryStore::new());
        let svc = MovieService::new(store.clone(), Arc::new(FixedGateway));
        svc.create(movie("Inception", 2010)).await.unwrap();
        svc.create(movie("The Matrix", 1999)).await.unwrap();
        svc.create(movie("Interstellar", 2014)).await.unwrap();
        (store, svc)
    }

    async fn add_review(store: &MemoryStore, movie_id: DbId, rating: i32) {
        let user = match store.find_by_username("critic").await.unwrap() {
            Some(user) => user,
            None => UserRepository::create(
                store,
                &CreateUser {
                    username: "critic".to_string(),
                    email: "critic@test.com".to_string(),
                    password_hash: "hash".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap(),
        };
        ReviewRepository::create(
            store,
            user.id,
            &CreateReview {
                content: "Noted".to_string(),
                rating,
                movie_id,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn movie_without_reviews_has_zero_aggregate() {
        let (_, svc) = seeded().await;
        let dto = svc.get_by_id(1).await.unwrap().unwrap();

        assert_eq!(dto.review_count, 0);
        assert_eq!(dto.average_rating, 0.0);
        assert_eq!(dto.imdb_rating, "7.5");
    }

    #[tokio::test]
    async fn average_is_recomputed_from_current_reviews() {
        let (store, svc) = seeded().await;
        add_review(&store, 1, 8).await;
        add_review(&store, 1, 5).await;

        let first = svc.get_by_id(1).await.unwrap().unwrap();
        let second = svc.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(first.review_count, 2);
        assert_eq!(first.average_rating, 6.5);
        assert_eq!(first.average_rating, second.average_rating);

        add_review(&store, 1, 2).await;
        let third = svc.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(third.review_count, 3);
        assert_eq!(third.average_rating, 5.0);
    }

    #[tokio::test]
    async fn missing_movie_is_none() {
        let (_, svc) = seeded().await;
        assert!(svc.get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn name_filter_is_case_insensitive() {
        let (_, svc) = seeded().await;
        let query = MovieQuery::new(Some("IN".to_string()), None, false, None, None);

        let titles: Vec<String> = svc
            .get_all_with_query(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Inception", "Interstellar"]);
    }

    #[tokio::test]
    async fn release_year_sort_descending() {
        let (_, svc) = seeded().await;
        let query = MovieQuery::new(None, Some("releaseYear"), true, None, None);

        let years: Vec<i32> = svc
            .get_all_with_query(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.release_year)
            .collect();
        assert_eq!(years, vec![2014, 2010, 1999]);
    }

    #[tokio::test]
    async fn pagination_applies_after_sort() {
        let (_, svc) = seeded().await;
        let query = MovieQuery::new(None, Some("name"), false, Some(2), Some(2));

        let page = svc.get_all_with_query(&query).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "The Matrix");
    }

    #[tokio::test]
    async fn top_rated_orders_by_mean() {
        let (store, svc) = seeded().await;
        add_review(&store, 1, 6).await;
        add_review(&store, 2, 9).await;

        let ids: Vec<DbId> = svc
            .get_top_rated(2)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);

        assert!(svc.get_top_rated(-3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn by_year_is_exact() {
        let (_, svc) = seeded().await;
        let found = svc.get_by_year(1999).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "The Matrix");
        assert!(svc.get_by_year(2000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_returns_enriched_dto() {
        let store = Arc::new(MemoryStore::new());
        let svc = MovieService::new(store, Arc::new(FixedGateway));

        let dto = svc.create(movie("Unknown", 2001)).await.unwrap();
        assert_eq!(dto.review_count, 0);
        assert_eq!(dto.average_rating, 0.0);
        assert_eq!(dto.imdb_rating, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn update_and_delete_report_absence() {
        let (_, svc) = seeded().await;

        assert!(svc.update(1, replacement("Inception (Remastered)")).await.unwrap());
        assert!(!svc.update(42, replacement("Ghost")).await.unwrap());

        let renamed = svc.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(renamed.title, "Inception (Remastered)");

        assert!(svc.delete(1).await.unwrap());
        assert!(!svc.delete(1).await.unwrap());
        assert!(!svc.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn enrichment_is_bounded_and_ordered() {
        let store = Arc::new(MemoryStore::new());
        let probe = Arc::new(ConcurrencyProbe::default());
        let svc = MovieService::new(store, probe.clone());

        for i in 0..20 {
            svc.movies
                .create(&movie(&format!("Movie {i:02}"), 2000))
                .await
                .unwrap();
        }

        let all = svc.get_all().await.unwrap();
        let expected: Vec<String> = (0..20).map(|i| format!("Movie {i:02}")).collect();
        let ratings: Vec<String> = all.into_iter().map(|m| m.imdb_rating).collect();

        assert_eq!(ratings, expected);
        assert!(probe.peak.load(Ordering::SeqCst) <= MAX_CONCURRENT_LOOKUPS);
    }
}
