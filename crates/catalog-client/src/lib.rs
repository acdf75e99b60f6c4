//! Client for the external movie catalog (TMDB).
//!
//! This crate handles:
//! - Searching the catalog and fetching movie details
//! - Streaming availability per region, filtered to an allow-list
//! - Converting catalog results into watchlist records (`NewMovie`)
//!
//! The [`Catalog`] trait is the seam the watchlist service depends on;
//! [`TmdbClient`] is the HTTP implementation.

pub mod providers;
pub mod tmdb;
pub mod types;

use async_trait::async_trait;
use collection::TmdbId;
use thiserror::Error;

pub use providers::{allowed_only, is_provider_allowed, provider_url, ALLOWED_PROVIDERS};
pub use tmdb::TmdbClient;
pub use types::{
    image_url, CatalogGenre, CatalogMovie, Language, RegionProviders, SearchResponse,
    WatchProvider, WatchProviders,
};

/// Errors that can occur when talking to the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Catalog API key is not configured")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Read access to a movie catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search movies by title
    async fn search(&self, query: &str, language: Language) -> Result<SearchResponse>;

    /// Full details for one movie
    async fn details(&self, id: TmdbId, language: Language) -> Result<CatalogMovie>;

    /// Streaming availability; failures yield an empty map
    async fn providers(&self, id: TmdbId) -> WatchProviders;
}
