//! Error types for the collection crate.
//!
//! These cover the invariants of the in-memory collection: unique ids,
//! unique catalog ids and unique order numbers.

use crate::types::{MovieId, OrderNumber, TmdbId};
use thiserror::Error;

/// Errors that can occur while building or editing a [`Collection`](crate::Collection)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollectionError {
    /// A movie with this catalog id is already tracked
    #[error("Movie with catalog id {tmdb_id} is already in the collection")]
    DuplicateMovie { tmdb_id: TmdbId },

    /// Two records share the same store id
    #[error("Duplicate movie id: {id}")]
    DuplicateId { id: MovieId },

    /// Two records share the same order number
    #[error("Duplicate order number: {order_number}")]
    DuplicateOrderNumber { order_number: OrderNumber },

    /// No movie with this id is tracked
    #[error("Movie not found: {id}")]
    MovieNotFound { id: MovieId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CollectionError>;
