//! Free-text search over movie titles.

use crate::traits::Filter;
use collection::Movie;

/// Keeps movies whose title contains the query, ignoring case.
pub struct TitleSearchFilter {
    query: String,
}

impl TitleSearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_lowercase(),
        }
    }
}

impl Filter for TitleSearchFilter {
    fn name(&self) -> &str {
        "TitleSearchFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        movie.title.to_lowercase().contains(&self.query)
    }
}
