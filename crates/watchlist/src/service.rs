//! # Watchlist Service
//!
//! Composes the store, the catalog and the pure engines:
//! 1. Load the collection from the store (normalized on the way in)
//! 2. Derive views with the filter pipeline
//! 3. Add catalog results, guarding against duplicates
//! 4. Toggle watched optimistically, reverting on store failure
//! 5. Hand out random suggestions from the unwatched movies
//!
//! The service owns the in-memory collection; the store stays the source
//! of truth and is re-listed after every creation.

use std::sync::Arc;

use catalog_client::{
    allowed_only, image_url, Catalog, CatalogMovie, Language, RegionProviders,
};
use collection::{Collection, Movie, MovieId, TmdbId};
use pipeline::FilterConfiguration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use suggestion::{RandomSuggestionSelector, Suggestion, SuggestionSession};
use tracing::{info, instrument, warn};

use crate::error::{Result, WatchlistError};
use crate::store::{MovieStore, StoreError};

/// Catalog details of a movie with its allowed streaming offers
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub movie: CatalogMovie,
    /// Full poster URL, if the catalog has a poster
    pub poster_url: Option<String>,
    pub region: String,
    /// Allowed providers in `region`, `None` when the movie is not offered there
    pub providers: Option<RegionProviders>,
}

/// The user's watchlist: store, catalog and in-memory collection
pub struct WatchlistService {
    store: Arc<dyn MovieStore>,
    catalog: Option<Arc<dyn Catalog>>,
    language: Language,
    collection: Collection,
    suggestions: SuggestionSession<StdRng>,
}

impl WatchlistService {
    /// Create a service over `store` with an empty collection.
    ///
    /// Call [`load`](Self::load) before reading the collection.
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self {
            store,
            catalog: None,
            language: Language::default(),
            collection: Collection::new(),
            suggestions: SuggestionSession::with_selector(RandomSuggestionSelector::with_rng(
                StdRng::from_rng(&mut rand::rng()),
            )),
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Use a specific random source for suggestions
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.suggestions =
            SuggestionSession::with_selector(RandomSuggestionSelector::with_rng(rng));
        self
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn catalog(&self) -> Result<&dyn Catalog> {
        self.catalog
            .as_deref()
            .ok_or(WatchlistError::CatalogUnavailable)
    }

    /// Replace the in-memory collection with the store's records.
    ///
    /// An unavailable store yields an empty collection.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<&Collection> {
        self.collection = match self.store.list().await {
            Ok(movies) => Collection::from_movies(movies),
            Err(StoreError::Unavailable(reason)) => {
                warn!("Store unavailable, showing an empty watchlist: {}", reason);
                Collection::new()
            }
            Err(e) => return Err(e.into()),
        };
        info!("Loaded {} movies", self.collection.len());
        Ok(&self.collection)
    }

    /// Same as [`load`](Self::load); used after changes
    pub async fn reload(&mut self) -> Result<&Collection> {
        self.load().await
    }

    /// The filtered and sorted view of the collection
    pub fn view(&self, filters: &FilterConfiguration, query: &str) -> Vec<Movie> {
        pipeline::apply(self.collection.movies(), filters, query)
    }

    /// Add a catalog result to the watchlist.
    ///
    /// The store is re-listed first so a movie added elsewhere is still
    /// caught as a duplicate.
    #[instrument(skip(self, candidate), fields(tmdb_id = candidate.id))]
    pub async fn add_from_catalog(&mut self, candidate: &CatalogMovie) -> Result<MovieId> {
        let current = self.store.list().await?;
        if current.iter().any(|m| m.tmdb_id == candidate.id) {
            warn!("Movie {} is already in the watchlist", candidate.id);
            return Err(WatchlistError::DuplicateMovie(candidate.id));
        }

        let id = self.store.create(candidate.to_new_movie()).await?;
        info!("Added {:?} as {}", candidate.title, id);
        self.reload().await?;
        Ok(id)
    }

    /// Fetch a movie's details from the catalog and add it
    pub async fn add_by_tmdb_id(&mut self, tmdb_id: TmdbId) -> Result<MovieId> {
        let details = self.catalog()?.details(tmdb_id, self.language).await?;
        self.add_from_catalog(&details).await
    }

    /// Flip a movie's watched flag, returning the new value.
    ///
    /// Memory is patched first and restored if the store rejects the change.
    #[instrument(skip(self))]
    pub async fn toggle_watched(&mut self, id: &str) -> Result<bool> {
        let watched = !self
            .collection
            .get(id)
            .ok_or_else(|| WatchlistError::MovieNotFound(id.to_string()))?
            .watched;
        self.collection.set_watched(id, watched)?;

        if let Err(e) = self.store.set_watched(id, watched).await {
            warn!("Failed to persist watched flag for {}, reverting: {}", id, e);
            self.collection.set_watched(id, !watched)?;
            return Err(e.into());
        }
        Ok(watched)
    }

    /// Delete a movie from the store and the collection
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: &str) -> Result<Movie> {
        if self.collection.get(id).is_none() {
            return Err(WatchlistError::MovieNotFound(id.to_string()));
        }
        self.store.delete(id).await?;
        if self.suggestions.current() == Some(id) {
            self.suggestions.close();
        }
        Ok(self.collection.remove(id)?)
    }

    /// A random unwatched movie
    pub fn suggest(&mut self) -> Suggestion<'_> {
        self.suggestions.suggest(self.collection.movies())
    }

    /// A random unwatched movie other than the current suggestion
    pub fn another(&mut self) -> Suggestion<'_> {
        self.suggestions.another(self.collection.movies())
    }

    /// A random unwatched movie other than `previous_id`, for callers that
    /// showed the previous suggestion in an earlier session
    pub fn another_than(&mut self, previous_id: &str) -> Suggestion<'_> {
        self.suggestions.resume(previous_id.to_string());
        self.suggestions.another(self.collection.movies())
    }

    /// Mark the current suggestion as watched and end the session.
    ///
    /// The session stays open when the store rejects the change.
    pub async fn watch_suggestion(&mut self) -> Result<Option<MovieId>> {
        let Some(id) = self.suggestions.current().map(str::to_string) else {
            return Ok(None);
        };
        let watched = self.collection.get(&id).is_some_and(|m| m.watched);
        if !watched {
            self.toggle_watched(&id).await?;
        }
        self.suggestions.close();
        Ok(Some(id))
    }

    /// Search the catalog in the service's language
    #[instrument(skip(self))]
    pub async fn search_catalog(&self, query: &str) -> Result<Vec<CatalogMovie>> {
        let response = self.catalog()?.search(query, self.language).await?;
        Ok(response.results)
    }

    /// Details of a catalog movie with allowed providers in `region`
    #[instrument(skip(self))]
    pub async fn movie_details(&self, tmdb_id: TmdbId, region: &str) -> Result<MovieDetails> {
        let catalog = self.catalog()?;
        let movie = catalog.details(tmdb_id, self.language).await?;
        let providers = catalog.providers(tmdb_id).await;

        let providers = providers
            .region(region)
            .map(allowed_only)
            .filter(|offers| !offers.is_empty());

        Ok(MovieDetails {
            poster_url: movie.poster_path.as_deref().and_then(image_url),
            region: region.to_ascii_uppercase(),
            providers,
            movie,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockMovieStore;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn movie(id: &str, tmdb_id: u32, order_number: u64, watched: bool) -> Movie {
        Movie {
            id: id.to_string(),
            title: format!("Movie {}", id),
            year: 2001,
            genre: "18".to_string(),
            rating: 7.0,
            poster: String::new(),
            watched,
            tmdb_id,
            order_number,
        }
    }

    fn service(store: MockMovieStore) -> WatchlistService {
        WatchlistService::new(Arc::new(store)).with_rng(StdRng::seed_from_u64(17))
    }

    #[tokio::test]
    async fn test_load_normalizes_genres() {
        let mut store = MockMovieStore::new();
        store
            .expect_list()
            .returning(|| Ok(vec![movie("a", 1, 1, false)]));

        let mut service = service(store);
        let collection = service.load().await.unwrap();
        assert_eq!(collection.movies()[0].genre, "Drama");
    }

    #[tokio::test]
    async fn test_load_unavailable_store_is_empty() {
        let mut store = MockMovieStore::new();
        store
            .expect_list()
            .returning(|| Err(StoreError::Unavailable("offline".to_string())));

        let mut service = service(store);
        assert!(service.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_other_errors_propagate() {
        let mut store = MockMovieStore::new();
        store
            .expect_list()
            .returning(|| Err(StoreError::NotFound("x".to_string())));

        let mut service = service(store);
        assert!(matches!(
            service.load().await,
            Err(WatchlistError::Store(StoreError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_toggle_reverts_on_store_failure() {
        let mut store = MockMovieStore::new();
        store
            .expect_list()
            .returning(|| Ok(vec![movie("a", 1, 1, false)]));
        store
            .expect_set_watched()
            .with(eq("a"), eq(true))
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("offline".to_string())));

        let mut service = service(store);
        service.load().await.unwrap();

        assert!(service.toggle_watched("a").await.is_err());
        assert!(!service.collection().get("a").unwrap().watched);
    }

    #[tokio::test]
    async fn test_toggle_persists() {
        let mut store = MockMovieStore::new();
        store
            .expect_list()
            .returning(|| Ok(vec![movie("a", 1, 1, true)]));
        store
            .expect_set_watched()
            .with(eq("a"), eq(false))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut service = service(store);
        service.load().await.unwrap();

        assert!(!service.toggle_watched("a").await.unwrap());
        assert!(!service.collection().get("a").unwrap().watched);
    }

    #[tokio::test]
    async fn test_toggle_unknown_movie() {
        let mut store = MockMovieStore::new();
        store.expect_list().returning(|| Ok(Vec::new()));
        store.expect_set_watched().never();

        let mut service = service(store);
        service.load().await.unwrap();
        assert!(matches!(
            service.toggle_watched("missing").await,
            Err(WatchlistError::MovieNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_without_creating() {
        let mut store = MockMovieStore::new();
        store
            .expect_list()
            .returning(|| Ok(vec![movie("a", 603, 1, false)]));
        store.expect_create().never();

        let candidate: CatalogMovie =
            serde_json::from_str(r#"{"id": 603, "title": "The Matrix"}"#).unwrap();

        let mut service = service(store);
        assert!(matches!(
            service.add_from_catalog(&candidate).await,
            Err(WatchlistError::DuplicateMovie(603))
        ));
    }

    #[tokio::test]
    async fn test_remove_keeps_memory_when_store_fails() {
        let mut store = MockMovieStore::new();
        store
            .expect_list()
            .returning(|| Ok(vec![movie("a", 1, 1, false)]));
        store
            .expect_delete()
            .returning(|_| Err(StoreError::Unavailable("offline".to_string())));

        let mut service = service(store);
        service.load().await.unwrap();

        assert!(service.remove("a").await.is_err());
        assert!(service.collection().get("a").is_some());
    }

    #[tokio::test]
    async fn test_watch_suggestion_keeps_session_on_store_failure() {
        let mut seq = Sequence::new();
        let mut store = MockMovieStore::new();
        store
            .expect_list()
            .returning(|| Ok(vec![movie("a", 1, 1, false)]));
        store
            .expect_set_watched()
            .with(eq("a"), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(StoreError::Unavailable("offline".to_string())));
        store
            .expect_set_watched()
            .with(eq("a"), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut service = service(store);
        service.load().await.unwrap();
        assert_eq!(service.suggest().movie().unwrap().id, "a");

        assert!(service.watch_suggestion().await.is_err());
        assert!(!service.collection().get("a").unwrap().watched);

        // The same suggestion can be retried
        assert_eq!(service.watch_suggestion().await.unwrap(), Some("a".to_string()));
        assert!(service.collection().get("a").unwrap().watched);
        assert_eq!(service.watch_suggestion().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_catalog_operations_require_catalog() {
        let mut store = MockMovieStore::new();
        store.expect_list().returning(|| Ok(Vec::new()));

        let service = service(store);
        assert!(matches!(
            service.search_catalog("matrix").await,
            Err(WatchlistError::CatalogUnavailable)
        ));
    }
}
