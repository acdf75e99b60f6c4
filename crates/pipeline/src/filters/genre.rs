//! Filter on the genre field.
//!
//! Genre fields are comma-joined name lists, so matching is a
//! case-insensitive substring test rather than an exact comparison.
//! Fields are normalized when movies enter the collection.

use crate::traits::Filter;
use collection::Movie;

/// Keeps movies whose genre field contains the given genre, ignoring case.
pub struct GenreFilter {
    genre: String,
}

impl GenreFilter {
    pub fn new(genre: &str) -> Self {
        Self {
            genre: genre.to_lowercase(),
        }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        movie.genre.to_lowercase().contains(&self.genre)
    }
}
