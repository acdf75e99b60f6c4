//! # Watchlist Crate
//!
//! The user's movie watchlist: persistence, catalog lookups, filtered views
//! and random suggestions, composed in [`WatchlistService`].
//!
//! ## Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use watchlist::{JsonFileStore, WatchlistService};
//!
//! let mut service = WatchlistService::new(Arc::new(JsonFileStore::new("watchlist.json")));
//! service.load().await?;
//! let view = service.view(&FilterConfiguration::default(), "");
//! ```

pub mod error;
pub mod service;
pub mod store;

pub use error::{Result, WatchlistError};
pub use service::{MovieDetails, WatchlistService};
pub use store::{InMemoryStore, JsonFileStore, MovieStore, StoreError};
