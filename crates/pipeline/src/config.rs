//! Filter configuration for the derived view.
//!
//! A [`FilterConfiguration`] is a value object owned by the caller. It is
//! replaced wholesale on every user edit and passed to [`crate::apply`];
//! the pipeline never keeps it between calls.
//!
//! The serialized form matches the stored UI state: camelCase fields and a
//! minimum rating of `1` meaning "no constraint". In memory that threshold is
//! an `Option<f64>` so the sentinel does not leak into new code.

use crate::error::ConfigError;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Lowest year the range filter starts at
pub const MIN_YEAR: i32 = 1900;

/// Bounds of the nominal rating scale used by the filter inputs
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 10.0;

/// Selects which of the specific/range settings of a field is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Specific,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Creation order
    #[default]
    OrderNumber,
    Alphabetical,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Inclusive year bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// Inclusive rating bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

impl Default for RatingRange {
    fn default() -> Self {
        Self {
            min: MIN_RATING,
            max: MAX_RATING,
        }
    }
}

/// Everything the user can constrain the derived view with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfiguration {
    /// Case-insensitive substring of the genre field; empty = any
    pub genre: String,
    pub year_filter_type: FilterType,
    /// Specific-year query: 4 digits = exact year, 1-3 digits = prefix
    pub year: String,
    pub year_range: YearRange,
    /// `None` = watched and pending
    pub watched: Option<bool>,
    pub rating_filter_type: FilterType,
    /// Inclusive minimum rating; `None` = no constraint
    #[serde(with = "rating_sentinel")]
    pub rating: Option<f64>,
    pub rating_range: RatingRange,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for FilterConfiguration {
    fn default() -> Self {
        Self::with_current_year(chrono::Local::now().year())
    }
}

impl FilterConfiguration {
    /// Default configuration with the year range ending at `current_year`
    pub fn with_current_year(current_year: i32) -> Self {
        Self {
            genre: String::new(),
            year_filter_type: FilterType::Specific,
            year: String::new(),
            year_range: YearRange {
                min: MIN_YEAR,
                max: current_year,
            },
            watched: None,
            rating_filter_type: FilterType::Specific,
            rating: None,
            rating_range: RatingRange::default(),
            sort_by: SortBy::OrderNumber,
            sort_order: SortOrder::Asc,
        }
    }

    /// Restore the defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no constraint is active (sorting is not a constraint)
    pub fn is_cleared(&self) -> bool {
        self.genre.is_empty()
            && self.year_filter_type == FilterType::Specific
            && self.year.is_empty()
            && self.watched.is_none()
            && self.rating_filter_type == FilterType::Specific
            && self.rating.is_none()
    }

    /// Set the specific-year query from raw text input.
    ///
    /// Empty input clears the constraint; anything but up to 4 digits is
    /// rejected and leaves the configuration untouched.
    pub fn set_year_input(&mut self, text: &str) -> Result<(), ConfigError> {
        let text = text.trim();
        if text.is_empty() {
            self.year.clear();
            return Ok(());
        }
        if text.len() > 4 || !text.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidYear(text.to_string()));
        }
        self.year = text.to_string();
        Ok(())
    }

    /// Set the minimum rating from raw text input.
    ///
    /// Empty input clears the constraint. Accepts decimals from 1 to 10;
    /// `1` is the bottom of the scale and therefore also clears it.
    pub fn set_rating_input(&mut self, text: &str) -> Result<(), ConfigError> {
        let text = text.trim();
        if text.is_empty() {
            self.rating = None;
            return Ok(());
        }

        let invalid = || ConfigError::InvalidRating(text.to_string());
        if text.chars().filter(|&c| c == '.').count() > 1
            || !text.chars().all(|c| c.is_ascii_digit() || c == '.')
        {
            return Err(invalid());
        }
        let value: f64 = text.parse().map_err(|_| invalid())?;
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(invalid());
        }
        self.set_rating(Some(value));
        Ok(())
    }

    /// Set the minimum rating; values at or below the scale floor clear it
    pub fn set_rating(&mut self, rating: Option<f64>) {
        self.rating = rating.filter(|&r| r > MIN_RATING);
    }

    /// Edit the lower year bound, clamped to the upper bound
    pub fn set_year_range_min(&mut self, min: i32) {
        self.year_range.min = min.min(self.year_range.max);
    }

    /// Edit the upper year bound, clamped to the lower bound
    pub fn set_year_range_max(&mut self, max: i32) {
        self.year_range.max = max.max(self.year_range.min);
    }

    /// Edit the lower rating bound, clamped to the upper bound
    pub fn set_rating_range_min(&mut self, min: f64) {
        self.rating_range.min = min.min(self.rating_range.max);
    }

    /// Edit the upper rating bound, clamped to the lower bound
    pub fn set_rating_range_max(&mut self, max: f64) {
        self.rating_range.max = max.max(self.rating_range.min);
    }

    pub fn toggle_sort_order(&mut self) {
        self.sort_order = match self.sort_order {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        };
    }

    /// Short labels for the active constraints, for summary lines
    pub fn active_filters(&self) -> Vec<String> {
        let mut labels = Vec::new();

        if let Some(watched) = self.watched {
            labels.push(if watched { "Watched" } else { "Pending" }.to_string());
        }
        match self.rating_filter_type {
            FilterType::Specific => {
                if let Some(rating) = self.rating {
                    labels.push(format!("≥{}", rating));
                }
            }
            FilterType::Range => labels.push(format!(
                "rating {}-{}",
                self.rating_range.min, self.rating_range.max
            )),
        }
        match self.year_filter_type {
            FilterType::Specific => {
                if !self.year.is_empty() {
                    labels.push(self.year.clone());
                }
            }
            FilterType::Range => labels.push(format!(
                "{}-{}",
                self.year_range.min, self.year_range.max
            )),
        }
        if !self.genre.is_empty() {
            labels.push(self.genre.clone());
        }
        labels
    }
}

/// Serializes an optional minimum rating using `1` as "unset"
mod rating_sentinel {
    use super::MIN_RATING;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(rating: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(rating.unwrap_or(MIN_RATING))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Some(value).filter(|&r| r > MIN_RATING))
    }
}
