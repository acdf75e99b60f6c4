//! Filter on release year.
//!
//! ## Specific mode
//! The year query is typed digit by digit, so a partial query is treated as
//! a prefix: "19" matches every year from 1900 to 1999, "199" the 1990s.
//! A full 4-digit query matches that year exactly.
//!
//! ## Range mode
//! Inclusive bounds on both ends.

use crate::config::{FilterConfiguration, FilterType};
use crate::traits::Filter;
use collection::Movie;

pub enum YearFilter {
    /// Exactly this year (4-character query)
    Exact(String),
    /// Year starts with these digits (1-3 character query)
    Prefix(String),
    /// `min <= year <= max`
    Range { min: i32, max: i32 },
}

impl YearFilter {
    /// Build the year stage selected by the configuration's discriminant.
    ///
    /// Returns `None` when the selected mode carries no constraint: an empty
    /// specific query, or one longer than four characters.
    pub fn from_config(config: &FilterConfiguration) -> Option<Self> {
        match config.year_filter_type {
            FilterType::Specific => {
                let query = config.year.as_str();
                match query.chars().count() {
                    4 => Some(YearFilter::Exact(query.to_string())),
                    1..=3 => Some(YearFilter::Prefix(query.to_string())),
                    _ => None,
                }
            }
            FilterType::Range => Some(YearFilter::Range {
                min: config.year_range.min,
                max: config.year_range.max,
            }),
        }
    }
}

impl Filter for YearFilter {
    fn name(&self) -> &str {
        match self {
            YearFilter::Exact(_) => "YearFilter(exact)",
            YearFilter::Prefix(_) => "YearFilter(prefix)",
            YearFilter::Range { .. } => "YearFilter(range)",
        }
    }

    fn matches(&self, movie: &Movie) -> bool {
        match self {
            YearFilter::Exact(year) => movie.year.to_string() == *year,
            YearFilter::Prefix(prefix) => movie.year.to_string().starts_with(prefix.as_str()),
            YearFilter::Range { min, max } => (*min..=*max).contains(&movie.year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_movie;

    fn config_with_year(year: &str) -> FilterConfiguration {
        let mut config = FilterConfiguration::with_current_year(2025);
        config.year = year.to_string();
        config
    }

    fn years(filtered: &[Movie]) -> Vec<i32> {
        filtered.iter().map(|m| m.year).collect()
    }

    fn sample() -> Vec<Movie> {
        vec![
            test_movie("1", "A", 1995),
            test_movie("2", "B", 1999),
            test_movie("3", "C", 2001),
        ]
    }

    #[test]
    fn test_prefix_match() {
        let filter = YearFilter::from_config(&config_with_year("19")).unwrap();
        assert_eq!(years(&filter.apply(sample())), vec![1995, 1999]);

        let filter = YearFilter::from_config(&config_with_year("2")).unwrap();
        assert_eq!(years(&filter.apply(sample())), vec![2001]);
    }

    #[test]
    fn test_exact_match() {
        let filter = YearFilter::from_config(&config_with_year("1995")).unwrap();
        assert_eq!(years(&filter.apply(sample())), vec![1995]);
    }

    #[test]
    fn test_no_constraint() {
        assert!(YearFilter::from_config(&config_with_year("")).is_none());
        assert!(YearFilter::from_config(&config_with_year("19955")).is_none());
    }

    #[test]
    fn test_range_ignores_specific_query() {
        let mut config = config_with_year("2001");
        config.year_filter_type = FilterType::Range;
        config.year_range.min = 1990;
        config.year_range.max = 1999;

        let filter = YearFilter::from_config(&config).unwrap();
        assert_eq!(years(&filter.apply(sample())), vec![1995, 1999]);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let filter = YearFilter::Range { min: 1995, max: 2001 };
        assert_eq!(years(&filter.apply(sample())), vec![1995, 1999, 2001]);
    }
}
