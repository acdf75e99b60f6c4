//! Filtering and sorting of the movie collection into the derived view.
//!
//! This crate provides:
//! - FilterConfiguration, the caller-owned description of the view
//! - Filter trait and one implementation per stage
//! - FilterPipeline for composing the stages and the final sort
//! - `apply`, the pure entry point used by the watchlist service
//!
//! ## Architecture
//! Movies flow through the stages in a fixed order:
//! 1. Title search (free-text query)
//! 2. Genre
//! 3. Year (specific or range)
//! 4. Watch status
//! 5. Rating (minimum or range)
//! 6. Stable sort by order number, title or year
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{apply, FilterConfiguration};
//!
//! let mut filters = FilterConfiguration::default();
//! filters.set_year_input("19")?;
//! filters.watched = Some(false);
//!
//! let view = apply(collection.movies(), &filters, "star");
//! ```

pub mod config;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod sort;
pub mod traits;

// Re-export main types
pub use config::{FilterConfiguration, FilterType, RatingRange, SortBy, SortOrder, YearRange};
pub use error::ConfigError;
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;

use collection::Movie;

/// Compute the derived view of `movies` for a configuration and query.
///
/// Pure and deterministic: the input slice is not modified and the same
/// arguments always produce the same output.
pub fn apply(movies: &[Movie], filters: &FilterConfiguration, query: &str) -> Vec<Movie> {
    FilterPipeline::from_config(filters, query).apply(movies.to_vec())
}
