//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to the movie collection.

use collection::Movie;

/// Core trait for filtering movies.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a built pipeline to be shared between threads
/// - Filters are predicates built from one filter configuration; they hold
///   no state between calls, so a pipeline is a pure function of its input
/// - `apply` takes ownership of the Vec and narrows it in place
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether a movie passes this filter
    fn matches(&self, movie: &Movie) -> bool;

    /// Apply this filter to a set of movies, preserving their order.
    fn apply(&self, mut movies: Vec<Movie>) -> Vec<Movie> {
        movies.retain(|movie| self.matches(movie));
        movies
    }
}
