//! Filter implementations for the derived view.
//!
//! One filter per stage of the view: title search, genre, year, watch
//! status and rating. `FilterPipeline::from_config` composes them in
//! that order.

pub mod genre;
pub mod rating;
pub mod title_search;
pub mod watched;
pub mod year;

// Re-export for convenience
pub use genre::GenreFilter;
pub use rating::RatingFilter;
pub use title_search::TitleSearchFilter;
pub use watched::WatchedFilter;
pub use year::YearFilter;

#[cfg(test)]
pub(crate) fn test_movie(id: &str, title: &str, year: i32) -> collection::Movie {
    collection::Movie {
        id: id.to_string(),
        title: title.to_string(),
        year,
        genre: "Drama".to_string(),
        rating: 7.0,
        poster: String::new(),
        watched: false,
        tmdb_id: id.bytes().map(u32::from).sum(),
        order_number: 0,
    }
}
