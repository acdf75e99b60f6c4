//! Errors raised while editing a filter configuration.
//!
//! Applying filters never fails; only user input on the way into a
//! [`FilterConfiguration`](crate::FilterConfiguration) is validated.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Year input must be up to four digits
    #[error("Invalid year filter: {0:?} (expected up to 4 digits)")]
    InvalidYear(String),

    /// Rating input must be a decimal between 1 and 10
    #[error("Invalid rating filter: {0:?} (expected a number from 1 to 10)")]
    InvalidRating(String),
}
