use catalog_client::CatalogError;
use collection::{CollectionError, MovieId, TmdbId};
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the watchlist service
#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("Movie with catalog id {0} is already in the watchlist")]
    DuplicateMovie(TmdbId),

    #[error("Movie not found: {0}")]
    MovieNotFound(MovieId),

    #[error("No catalog configured")]
    CatalogUnavailable,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Collection(#[from] CollectionError),
}

pub type Result<T> = std::result::Result<T, WatchlistError>;
