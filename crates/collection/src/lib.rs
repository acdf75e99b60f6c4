//! # Collection Crate
//!
//! Domain types for the movie watchlist and the in-memory collection that
//! mirrors the store.
//!
//! ## Main Components
//!
//! - **types**: `Movie`, `NewMovie` and the id aliases
//! - **genre**: TMDB genre table and genre-string repair
//! - **collection**: `Collection`, the normalized in-memory list
//! - **error**: Error types for collection invariants
//!
//! ## Example Usage
//!
//! ```ignore
//! use collection::Collection;
//!
//! let collection = Collection::from_movies(store.list().await?);
//! for movie in collection.unwatched() {
//!     println!("{} ({})", movie.title, movie.year);
//! }
//! ```

// Public modules
pub mod collection;
pub mod error;
pub mod genre;
pub mod types;

// Re-export commonly used types for convenience
pub use collection::Collection;
pub use error::{CollectionError, Result};
pub use genre::{genre_field_from_ids, genre_name, normalize_genre};
pub use types::{Movie, MovieId, NewMovie, OrderNumber, TmdbId};
