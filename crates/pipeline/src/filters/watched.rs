//! Filter on watch status.

use crate::traits::Filter;
use collection::Movie;

/// Keeps only watched, or only pending, movies.
pub struct WatchedFilter {
    watched: bool,
}

impl WatchedFilter {
    pub fn new(watched: bool) -> Self {
        Self { watched }
    }
}

impl Filter for WatchedFilter {
    fn name(&self) -> &str {
        "WatchedFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        movie.watched == self.watched
    }
}
