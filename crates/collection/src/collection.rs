//! The in-memory collection of tracked movies.
//!
//! This is the boundary where store records enter memory: every movie is
//! genre-normalized exactly once on the way in, so the filter pipeline can
//! assume clean data.

use crate::error::{CollectionError, Result};
use crate::genre::normalize_genre;
use crate::types::{Movie, MovieId, OrderNumber, TmdbId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// The user's tracked movies, held in memory by the caller.
///
/// Order of the underlying vector is the order the store returned; the
/// filter pipeline re-sorts per user preference regardless.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    movies: Vec<Movie>,
}

impl Collection {
    /// Creates a new, empty Collection
    pub fn new() -> Self {
        Self { movies: Vec::new() }
    }

    /// Build a collection from records listed by the store.
    ///
    /// Each record's genre field is normalized. Invariant violations coming
    /// from the store (duplicate ids, catalog ids or order numbers) are
    /// logged, not rejected, so one bad record never hides the whole list.
    pub fn from_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let movies: Vec<Movie> = movies.into_iter().map(normalize_movie).collect();
        let collection = Self { movies };

        if let Err(e) = collection.validate() {
            warn!("Collection loaded with inconsistent records: {}", e);
        }
        debug!("Collection built with {} movies", collection.len());
        collection
    }

    /// All movies, in store order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get a movie by its store id
    pub fn get(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    /// Get a movie by its catalog id
    pub fn find_by_tmdb_id(&self, tmdb_id: TmdbId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.tmdb_id == tmdb_id)
    }

    /// Whether a movie with this catalog id is already tracked
    pub fn contains_tmdb_id(&self, tmdb_id: TmdbId) -> bool {
        self.find_by_tmdb_id(tmdb_id).is_some()
    }

    /// Movies not yet watched, in store order
    pub fn unwatched(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter().filter(|m| !m.watched)
    }

    /// The order number a newly created movie should receive
    pub fn next_order_number(&self) -> OrderNumber {
        self.movies
            .iter()
            .map(|m| m.order_number)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Insert a movie, normalizing its genre field.
    ///
    /// Rejects records whose id or catalog id is already present.
    pub fn insert(&mut self, movie: Movie) -> Result<()> {
        if self.get(&movie.id).is_some() {
            return Err(CollectionError::DuplicateId { id: movie.id });
        }
        if self.contains_tmdb_id(movie.tmdb_id) {
            return Err(CollectionError::DuplicateMovie {
                tmdb_id: movie.tmdb_id,
            });
        }
        self.movies.push(normalize_movie(movie));
        Ok(())
    }

    /// Set the watched flag of a movie, returning its previous value
    pub fn set_watched(&mut self, id: &str, watched: bool) -> Result<bool> {
        let movie = self
            .movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CollectionError::MovieNotFound { id: id.to_string() })?;

        let previous = movie.watched;
        movie.watched = watched;
        Ok(previous)
    }

    /// Remove a movie, returning it
    pub fn remove(&mut self, id: &str) -> Result<Movie> {
        let position = self
            .movies
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| CollectionError::MovieNotFound { id: id.to_string() })?;
        Ok(self.movies.remove(position))
    }

    /// Validate collection invariants
    ///
    /// Check that:
    /// - ids are unique
    /// - catalog ids are unique
    /// - order numbers are unique
    pub fn validate(&self) -> Result<()> {
        let mut ids: HashSet<&MovieId> = HashSet::new();
        let mut tmdb_ids: HashSet<TmdbId> = HashSet::new();
        let mut order_numbers: HashSet<OrderNumber> = HashSet::new();

        for movie in &self.movies {
            if !ids.insert(&movie.id) {
                return Err(CollectionError::DuplicateId {
                    id: movie.id.clone(),
                });
            }
            if !tmdb_ids.insert(movie.tmdb_id) {
                return Err(CollectionError::DuplicateMovie {
                    tmdb_id: movie.tmdb_id,
                });
            }
            if !order_numbers.insert(movie.order_number) {
                return Err(CollectionError::DuplicateOrderNumber {
                    order_number: movie.order_number,
                });
            }
        }
        Ok(())
    }
}

fn normalize_movie(mut movie: Movie) -> Movie {
    movie.genre = normalize_genre(&movie.genre);
    movie
}
