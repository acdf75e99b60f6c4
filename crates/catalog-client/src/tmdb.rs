//! HTTP client for The Movie Database (TMDB) v3 API.

use crate::types::{CatalogMovie, Language, SearchResponse, WatchProviders};
use crate::{Catalog, CatalogError, Result};
use async_trait::async_trait;
use collection::TmdbId;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API client.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    /// Create a client for the public TMDB endpoint.
    ///
    /// Fails with `MissingApiKey` when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at another API root (a proxy or a local mock)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with the API key plus `params` and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("TMDB API error {} for {}", status, path);
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn search(&self, query: &str, language: Language) -> Result<SearchResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResponse::default());
        }
        let response: SearchResponse = self
            .get(
                "/search/movie",
                &[("query", query), ("language", language.tmdb_code())],
            )
            .await?;
        debug!("Search {:?} returned {} results", query, response.results.len());
        Ok(response)
    }

    async fn details(&self, id: TmdbId, language: Language) -> Result<CatalogMovie> {
        self.get(
            &format!("/movie/{}", id),
            &[("language", language.tmdb_code())],
        )
        .await
    }

    async fn providers(&self, id: TmdbId) -> WatchProviders {
        match self
            .get::<WatchProviders>(&format!("/movie/{}/watch/providers", id), &[])
            .await
        {
            Ok(providers) => providers,
            Err(e) => {
                warn!("Failed to fetch watch providers for {}: {}", id, e);
                WatchProviders::default()
            }
        }
    }
}
