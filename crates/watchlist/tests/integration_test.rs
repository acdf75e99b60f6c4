//! Integration tests for the watchlist service.
//!
//! Real stores, mocked catalog.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_client::{CatalogMovie, Language, SearchResponse, WatchProviders};
use collection::TmdbId;
use mockall::mock;
use pipeline::FilterConfiguration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use watchlist::{InMemoryStore, JsonFileStore, MovieStore, WatchlistError, WatchlistService};

mock! {
    pub TmdbCatalog {}

    #[async_trait]
    impl catalog_client::Catalog for TmdbCatalog {
        async fn search(&self, query: &str, language: Language) -> catalog_client::Result<SearchResponse>;
        async fn details(&self, id: TmdbId, language: Language) -> catalog_client::Result<CatalogMovie>;
        async fn providers(&self, id: TmdbId) -> WatchProviders;
    }
}

fn catalog_movie(json: &str) -> CatalogMovie {
    serde_json::from_str(json).unwrap()
}

fn matrix() -> CatalogMovie {
    catalog_movie(
        r#"{"id": 603, "title": "The Matrix", "release_date": "1999-03-30",
            "genre_ids": [28, 878], "vote_average": 8.2, "poster_path": "/matrix.jpg"}"#,
    )
}

fn heat() -> CatalogMovie {
    catalog_movie(
        r#"{"id": 949, "title": "Heat", "release_date": "1995-12-15",
            "genre_ids": [80, 18, 53], "vote_average": 7.9}"#,
    )
}

fn new_service(store: Arc<dyn MovieStore>) -> WatchlistService {
    WatchlistService::new(store).with_rng(StdRng::seed_from_u64(99))
}

#[tokio::test]
async fn test_add_and_view() {
    let mut service = new_service(Arc::new(InMemoryStore::new()));
    service.load().await.unwrap();

    service.add_from_catalog(&matrix()).await.unwrap();
    service.add_from_catalog(&heat()).await.unwrap();

    let view = service.view(&FilterConfiguration::default(), "");
    let titles: Vec<&str> = view.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["The Matrix", "Heat"]);
    assert_eq!(view[0].genre, "Action, Science Fiction");
    assert_eq!(view[1].genre, "Crime, Drama, Thriller");

    let mut filters = FilterConfiguration::default();
    filters.genre = "crime".to_string();
    assert_eq!(service.view(&filters, "").len(), 1);
}

#[tokio::test]
async fn test_duplicate_add_is_rejected() {
    let store = Arc::new(InMemoryStore::new());
    let mut service = new_service(store.clone());

    service.add_from_catalog(&matrix()).await.unwrap();
    let result = service.add_from_catalog(&matrix()).await;

    assert!(matches!(result, Err(WatchlistError::DuplicateMovie(603))));
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_suggestions_follow_watched_state() {
    let mut service = new_service(Arc::new(InMemoryStore::new()));
    service.add_from_catalog(&matrix()).await.unwrap();
    let heat_id = service.add_from_catalog(&heat()).await.unwrap();

    let first = service.suggest().movie().unwrap().id.clone();
    let second = service.another().movie().unwrap().id.clone();
    assert_ne!(first, second);

    // Only one unwatched left: nothing new to offer
    service.toggle_watched(&heat_id).await.unwrap();
    assert!(service.another().is_no_candidates());

    let remaining = service.suggest().movie().unwrap().id.clone();
    assert_ne!(remaining, heat_id);

    assert_eq!(service.watch_suggestion().await.unwrap(), Some(remaining));
    assert!(service.suggest().is_no_candidates());
}

#[tokio::test]
async fn test_another_than_previous_session() {
    let mut service = new_service(Arc::new(InMemoryStore::new()));
    let matrix_id = service.add_from_catalog(&matrix()).await.unwrap();
    let heat_id = service.add_from_catalog(&heat()).await.unwrap();

    for _ in 0..10 {
        let next = service.another_than(&matrix_id).movie().unwrap().id.clone();
        assert_eq!(next, heat_id);
    }
}

#[tokio::test]
async fn test_json_store_round_trip_through_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watchlist.json");

    {
        let mut service = new_service(Arc::new(JsonFileStore::new(&path)));
        let id = service.add_from_catalog(&heat()).await.unwrap();
        service.toggle_watched(&id).await.unwrap();
    }

    let mut service = new_service(Arc::new(JsonFileStore::new(&path)));
    let collection = service.load().await.unwrap();
    assert_eq!(collection.len(), 1);
    assert!(collection.movies()[0].watched);
}

#[tokio::test]
async fn test_remove() {
    let mut service = new_service(Arc::new(InMemoryStore::new()));
    let id = service.add_from_catalog(&heat()).await.unwrap();

    let removed = service.remove(&id).await.unwrap();
    assert_eq!(removed.tmdb_id, 949);
    assert!(service.collection().is_empty());
    assert!(matches!(
        service.remove(&id).await,
        Err(WatchlistError::MovieNotFound(_))
    ));
}

#[tokio::test]
async fn test_add_by_tmdb_id_uses_details() {
    let mut catalog = MockTmdbCatalog::new();
    catalog
        .expect_details()
        .returning(|_, _| {
            Ok(catalog_movie(
                r#"{"id": 680, "title": "Pulp Fiction", "release_date": "1994-09-10",
                    "genres": [{"id": 53, "name": "Thriller"}, {"id": 80, "name": "Crime"}]}"#,
            ))
        });

    let mut service =
        new_service(Arc::new(InMemoryStore::new())).with_catalog(Arc::new(catalog));
    let id = service.add_by_tmdb_id(680).await.unwrap();

    let movie = service.collection().get(&id).unwrap();
    assert_eq!(movie.title, "Pulp Fiction");
    assert_eq!(movie.year, 1994);
    assert_eq!(movie.genre, "Thriller, Crime");
}

#[tokio::test]
async fn test_search_uses_service_language() {
    let mut catalog = MockTmdbCatalog::new();
    catalog
        .expect_search()
        .withf(|query, language| query == "matrix" && *language == Language::Spanish)
        .returning(|_, _| {
            Ok(SearchResponse {
                results: vec![matrix()],
                total_pages: 1,
                total_results: 1,
            })
        });

    let service = new_service(Arc::new(InMemoryStore::new()))
        .with_catalog(Arc::new(catalog))
        .with_language(Language::Spanish);

    let results = service.search_catalog("matrix").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 603);
}

#[tokio::test]
async fn test_movie_details_filters_providers() {
    let mut catalog = MockTmdbCatalog::new();
    catalog.expect_details().returning(|_, _| Ok(matrix()));
    catalog.expect_providers().returning(|_| {
        serde_json::from_str(
            r#"{"results": {
                "MX": {"flatrate": [
                    {"provider_id": 8, "provider_name": "Netflix"},
                    {"provider_id": 283, "provider_name": "Crunchyroll"}]},
                "US": {"rent": [{"provider_id": 2, "provider_name": "Apple TV"}]}}}"#,
        )
        .unwrap()
    });

    let service = new_service(Arc::new(InMemoryStore::new())).with_catalog(Arc::new(catalog));

    let details = service.movie_details(603, "mx").await.unwrap();
    assert_eq!(details.region, "MX");
    assert_eq!(
        details.poster_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/matrix.jpg")
    );
    let providers = details.providers.unwrap();
    assert_eq!(providers.flatrate.len(), 1);
    assert_eq!(providers.flatrate[0].provider_name, "Netflix");

    // Only disallowed offers in the US
    let details = service.movie_details(603, "US").await.unwrap();
    assert!(details.providers.is_none());
}
