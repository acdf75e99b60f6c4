//! # Suggestion Crate
//!
//! Random "what should I watch?" suggestions over the watchlist.
//!
//! ## Components
//!
//! ### RandomSuggestionSelector
//! Stateless apart from its RNG: draws an unwatched movie uniformly at
//! random, and can draw "another" one that differs from a given previous
//! suggestion.
//!
//! ### SuggestionSession
//! Remembers the id of the current suggestion so repeated "another"
//! requests never show the same movie twice in a row.
//!
//! ## Example Usage
//!
//! ```ignore
//! use suggestion::{SuggestionSession, Suggestion};
//!
//! let mut session = SuggestionSession::new();
//! match session.suggest(collection.movies()) {
//!     Suggestion::Movie(movie) => println!("Watch {}", movie.title),
//!     Suggestion::NoCandidates => println!("Everything is watched!"),
//! }
//! let next = session.another(collection.movies());
//! ```

// Public modules
pub mod selector;
pub mod session;

// Re-export commonly used types
pub use selector::{RandomSuggestionSelector, Suggestion};
pub use session::SuggestionSession;
