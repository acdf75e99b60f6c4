//! Core domain types for the watchlist.
//!
//! Field names serialize in camelCase (`tmdbId`, `orderNumber`) so records
//! written by the store round-trip unchanged.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque identifier assigned by the store when a movie is created
pub type MovieId = String;

/// Identifier of a movie in the external catalog (TMDB)
pub type TmdbId = u32;

/// Creation sequence number, used as the default sort key
pub type OrderNumber = u64;

// =============================================================================
// Movie
// =============================================================================

/// A movie tracked in the user's watchlist.
///
/// Records are owned by the store and mirrored in memory by
/// [`Collection`](crate::Collection). The `genre` field is a comma-separated
/// list of genre names; it is normalized when the record enters a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Release year, nominally 1900 up to the current year
    pub year: i32,
    pub genre: String,
    /// Catalog vote average, nominally 0.0 - 10.0
    pub rating: f64,
    /// Poster path token from the catalog, may be empty
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub watched: bool,
    pub tmdb_id: TmdbId,
    pub order_number: OrderNumber,
}

/// A movie that has not been persisted yet.
///
/// The store assigns `id` and `order_number` on creation and every new
/// movie starts out unwatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: f64,
    #[serde(default)]
    pub poster: String,
    pub tmdb_id: TmdbId,
}

impl NewMovie {
    /// Materialize the persisted record once the store has assigned ids
    pub fn into_movie(self, id: MovieId, order_number: OrderNumber) -> Movie {
        Movie {
            id,
            title: self.title,
            year: self.year,
            genre: self.genre,
            rating: self.rating,
            poster: self.poster,
            watched: false,
            tmdb_id: self.tmdb_id,
            order_number,
        }
    }
}
