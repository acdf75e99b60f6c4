//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! filters together using the builder pattern, and builds the standard
//! stage sequence from a [`FilterConfiguration`].

use crate::config::{FilterConfiguration, SortBy, SortOrder};
use crate::filters::{GenreFilter, RatingFilter, TitleSearchFilter, WatchedFilter, YearFilter};
use crate::sort::sort_movies;
use crate::traits::Filter;
use collection::Movie;

/// Chains filters and a final sort into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(TitleSearchFilter::new("matrix"))
///     .add_filter(WatchedFilter::new(false))
///     .sort(SortBy::Year, SortOrder::Desc);
///
/// let view = pipeline.apply(movies.to_vec());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
    sort_by: SortBy,
    sort_order: SortOrder,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline, sorting by order number ascending.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort_by: SortBy::OrderNumber,
            sort_order: SortOrder::Asc,
        }
    }

    /// Build the pipeline for one filter configuration and search query.
    ///
    /// Stages run in a fixed order: title search, genre, year, watch status,
    /// rating. A stage is only added when its setting constrains anything,
    /// and for year and rating only the branch selected by the
    /// configuration's filter type is built.
    pub fn from_config(config: &FilterConfiguration, query: &str) -> Self {
        let mut pipeline = Self::new().sort(config.sort_by, config.sort_order);

        if !query.is_empty() {
            pipeline = pipeline.add_filter(TitleSearchFilter::new(query));
        }
        if !config.genre.is_empty() {
            pipeline = pipeline.add_filter(GenreFilter::new(&config.genre));
        }
        if let Some(year) = YearFilter::from_config(config) {
            pipeline = pipeline.add_filter(year);
        }
        if let Some(watched) = config.watched {
            pipeline = pipeline.add_filter(WatchedFilter::new(watched));
        }
        if let Some(rating) = RatingFilter::from_config(config) {
            pipeline = pipeline.add_filter(rating);
        }
        pipeline
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Set the final ordering (builder pattern).
    pub fn sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Number of filter stages
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence, then sort.
    ///
    /// ## Algorithm
    /// 1. Start with the input movies
    /// 2. For each filter in order, narrow the set and log the counts
    /// 3. Stable-sort the survivors by the configured key and direction
    pub fn apply(&self, movies: Vec<Movie>) -> Vec<Movie> {
        let mut current = movies;
        for filter in &self.filters {
            let input_count = current.len();
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} ({} -> {})",
                filter.name(),
                input_count,
                current.len()
            );
        }
        sort_movies(&mut current, self.sort_by, self.sort_order);
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
