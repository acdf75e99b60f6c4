//! Filter on the catalog rating.
//!
//! In specific mode the configured rating is a minimum threshold, not an
//! exact match. An unset threshold adds no stage at all.

use crate::config::{FilterConfiguration, FilterType};
use crate::traits::Filter;
use collection::Movie;

pub enum RatingFilter {
    /// `rating >= threshold`
    Minimum(f64),
    /// `min <= rating <= max`
    Range { min: f64, max: f64 },
}

impl RatingFilter {
    /// Build the rating stage selected by the configuration's discriminant
    pub fn from_config(config: &FilterConfiguration) -> Option<Self> {
        match config.rating_filter_type {
            FilterType::Specific => config.rating.map(RatingFilter::Minimum),
            FilterType::Range => Some(RatingFilter::Range {
                min: config.rating_range.min,
                max: config.rating_range.max,
            }),
        }
    }
}

impl Filter for RatingFilter {
    fn name(&self) -> &str {
        match self {
            RatingFilter::Minimum(_) => "RatingFilter(minimum)",
            RatingFilter::Range { .. } => "RatingFilter(range)",
        }
    }

    fn matches(&self, movie: &Movie) -> bool {
        match *self {
            RatingFilter::Minimum(threshold) => movie.rating >= threshold,
            RatingFilter::Range { min, max } => movie.rating >= min && movie.rating <= max,
        }
    }
}
