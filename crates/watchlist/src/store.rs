//! Persistence for tracked movies.
//!
//! The store owns the records; the service mirrors them in a `Collection`.
//! Two implementations ship with the crate: an in-memory store for tests and
//! embedding, and a JSON-file store used by the CLI.

use async_trait::async_trait;
use collection::{Movie, MovieId, NewMovie, OrderNumber};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Errors raised by a [`MovieStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Movie not found in store: {0}")]
    NotFound(MovieId),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where tracked movies live.
///
/// Duplicate prevention is the caller's job: list, check the catalog id,
/// then create.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All records, highest order number first
    async fn list(&self) -> Result<Vec<Movie>, StoreError>;

    /// Persist a new unwatched movie with a fresh order number
    async fn create(&self, movie: NewMovie) -> Result<MovieId, StoreError>;

    async fn set_watched(&self, id: &str, watched: bool) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Records plus the next order number to hand out.
///
/// `next_order` only grows, so order numbers freed by a delete are never
/// handed out again while the state is alive.
#[derive(Debug)]
struct StoreState {
    movies: Vec<Movie>,
    next_order: OrderNumber,
}

impl Default for StoreState {
    fn default() -> Self {
        Self::from_movies(Vec::new())
    }
}

impl StoreState {
    fn from_movies(movies: Vec<Movie>) -> Self {
        let next_order = movies.iter().map(|m| m.order_number).max().unwrap_or(0) + 1;
        Self { movies, next_order }
    }

    fn sorted(&self) -> Vec<Movie> {
        let mut movies = self.movies.clone();
        movies.sort_by(|a, b| b.order_number.cmp(&a.order_number));
        movies
    }

    fn create(&mut self, movie: NewMovie) -> MovieId {
        let order_number = self.next_order;
        self.next_order += 1;
        let mut id = format!("movie-{}", order_number);
        // Records imported from elsewhere may already use the generated form
        let mut suffix = 1;
        while self.movies.iter().any(|m| m.id == id) {
            id = format!("movie-{}-{}", order_number, suffix);
            suffix += 1;
        }
        self.movies.push(movie.into_movie(id.clone(), order_number));
        id
    }

    fn set_watched(&mut self, id: &str, watched: bool) -> Result<(), StoreError> {
        let movie = self
            .movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        movie.watched = watched;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != id);
        if self.movies.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// A store that keeps records in process memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            state: Mutex::new(StoreState::from_movies(movies)),
        }
    }
}

#[async_trait]
impl MovieStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(self.state.lock().await.sorted())
    }

    async fn create(&self, movie: NewMovie) -> Result<MovieId, StoreError> {
        Ok(self.state.lock().await.create(movie))
    }

    async fn set_watched(&self, id: &str, watched: bool) -> Result<(), StoreError> {
        self.state.lock().await.set_watched(id, watched)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.state.lock().await.delete(id)
    }
}

// =============================================================================
// JSON file store
// =============================================================================

/// On-disk layout of [`JsonFileStore`].
///
/// `next_order` is the high-water mark, so ids and order numbers of deleted
/// movies are not handed out again after a restart.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    next_order: OrderNumber,
    movies: Vec<Movie>,
}

/// Files written before the counter was stored hold a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredData {
    File(StoreFile),
    Array(Vec<Movie>),
}

impl From<StoredData> for StoreState {
    fn from(data: StoredData) -> Self {
        match data {
            StoredData::File(file) => {
                let mut state = StoreState::from_movies(file.movies);
                state.next_order = state.next_order.max(file.next_order);
                state
            }
            StoredData::Array(movies) => StoreState::from_movies(movies),
        }
    }
}

/// A store persisted as a JSON file.
///
/// The file is read on every operation and rewritten through a temporary
/// file after each change. A missing file is an empty store; a bare JSON
/// array of movies is accepted as well.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StoreState, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No store file at {}, starting empty", self.path.display());
                return Ok(StoreState::default());
            }
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(StoreState::default());
        }
        let data: StoredData = serde_json::from_str(&contents)?;
        Ok(data.into())
    }

    async fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        let file = StoreFile {
            next_order: state.next_order,
            movies: state.sorted(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Saved {} movies to {}", state.movies.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl MovieStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.sorted())
    }

    async fn create(&self, movie: NewMovie) -> Result<MovieId, StoreError> {
        let _guard = self.lock.lock().await;
        let mut state = self.load().await?;
        let id = state.create(movie);
        self.save(&state).await?;
        info!("Created {} in {}", id, self.path.display());
        Ok(id)
    }

    async fn set_watched(&self, id: &str, watched: bool) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut state = self.load().await?;
        state.set_watched(id, watched)?;
        self.save(&state).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut state = self.load().await?;
        state.delete(id)?;
        self.save(&state).await
    }
}
