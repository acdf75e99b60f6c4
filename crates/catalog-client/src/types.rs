//! Catalog (TMDB) response types and their conversion into watchlist records.

use chrono::Datelike;
use collection::genre::{genre_field_from_ids, NO_GENRE};
use collection::{NewMovie, TmdbId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Title written when the catalog returns an empty one
pub const UNTITLED: &str = "Untitled";

/// Base URL of poster images at the size shown in lists and details
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Catalog language, mapped to TMDB's locale codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// Parse a short UI language code; anything unknown is English
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" | "es-es" => Language::Spanish,
            _ => Language::English,
        }
    }

    /// Locale code sent as TMDB's `language` parameter
    pub fn tmdb_code(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Spanish => "es-ES",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogGenre {
    pub id: u32,
    pub name: String,
}

/// A movie as returned by catalog search or detail lookups.
///
/// Search results carry `genre_ids`; detail responses carry `genres`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMovie {
    pub id: TmdbId,
    #[serde(default)]
    pub title: String,
    /// "YYYY-MM-DD", may be empty for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub genres: Option<Vec<CatalogGenre>>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
}

impl CatalogMovie {
    /// Release year parsed from `release_date`
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }

    /// Raw genre field for a new record.
    ///
    /// Ids are preferred; detail responses fall back to their genre names.
    /// The result may contain placeholders and is normalized when the record
    /// enters a collection.
    pub fn genre_field(&self) -> String {
        if !self.genre_ids.is_empty() {
            return genre_field_from_ids(&self.genre_ids);
        }
        match &self.genres {
            Some(genres) if !genres.is_empty() => genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => NO_GENRE.to_string(),
        }
    }

    /// Convert into a record the store can create.
    ///
    /// Missing data gets defaults: `Untitled`, the current year, no poster.
    pub fn to_new_movie(&self) -> NewMovie {
        self.to_new_movie_in(chrono::Local::now().year())
    }

    /// As [`to_new_movie`](Self::to_new_movie), with an explicit fallback year
    pub fn to_new_movie_in(&self, current_year: i32) -> NewMovie {
        let title = self.title.trim();
        NewMovie {
            title: if title.is_empty() { UNTITLED } else { title }.to_string(),
            year: self.release_year().unwrap_or(current_year),
            genre: self.genre_field(),
            rating: self.vote_average,
            poster: self.poster_path.clone().unwrap_or_default(),
            tmdb_id: self.id,
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<CatalogMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchProvider {
    pub provider_id: u32,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

/// Streaming availability in one region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<WatchProvider>,
    #[serde(default)]
    pub rent: Vec<WatchProvider>,
    #[serde(default)]
    pub buy: Vec<WatchProvider>,
}

impl RegionProviders {
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty() && self.rent.is_empty() && self.buy.is_empty()
    }
}

/// Streaming availability keyed by region code ("MX", "US", ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: BTreeMap<String, RegionProviders>,
}

impl WatchProviders {
    /// Availability for a region, case-insensitive
    pub fn region(&self, code: &str) -> Option<&RegionProviders> {
        self.results.get(&code.to_ascii_uppercase())
    }
}

/// Full URL of a poster path, `None` when there is no poster
pub fn image_url(poster_path: &str) -> Option<String> {
    if poster_path.is_empty() {
        None
    } else {
        Some(format!("{}{}", IMAGE_BASE_URL, poster_path))
    }
}
