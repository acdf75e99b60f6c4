//! Random Suggestion Selector
//!
//! Picks an unwatched movie uniformly at random for "what should I watch?".
//!
//! ## Algorithm
//! 1. Collect the unwatched movies
//! 2. `suggest`: draw one, or report `NoCandidates` when none are left
//! 3. `another`: with fewer than two unwatched movies there is nothing new
//!    to offer, so report `NoCandidates` instead of repeating; otherwise
//!    drop the previous suggestion (by id) and draw from the rest
//!
//! The selector never mutates the collection and keeps no history; the
//! caller passes the previous suggestion back in.

use collection::Movie;
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::debug;

/// Outcome of a suggestion request.
///
/// `NoCandidates` is an ordinary result the caller renders as an
/// explanatory empty state, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Suggestion<'a> {
    Movie(&'a Movie),
    NoCandidates,
}

impl<'a> Suggestion<'a> {
    /// The suggested movie, if any
    pub fn movie(&self) -> Option<&'a Movie> {
        match *self {
            Suggestion::Movie(movie) => Some(movie),
            Suggestion::NoCandidates => None,
        }
    }

    pub fn is_no_candidates(&self) -> bool {
        matches!(self, Suggestion::NoCandidates)
    }
}

/// Draws random unwatched movies.
///
/// Generic over the random source so tests can use a seeded RNG; the
/// default is the thread-local RNG.
pub struct RandomSuggestionSelector<R = ThreadRng> {
    rng: R,
}

impl RandomSuggestionSelector<ThreadRng> {
    /// Create a selector backed by the thread-local RNG
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomSuggestionSelector<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSuggestionSelector<R> {
    /// Create a selector with a specific random source
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Suggest any unwatched movie
    pub fn suggest<'a>(&mut self, movies: &'a [Movie]) -> Suggestion<'a> {
        let unwatched: Vec<&Movie> = movies.iter().filter(|m| !m.watched).collect();
        debug!("Suggesting from {} unwatched movies", unwatched.len());
        self.pick(&unwatched)
    }

    /// Suggest an unwatched movie other than `previous`
    pub fn another<'a>(&mut self, movies: &'a [Movie], previous: &Movie) -> Suggestion<'a> {
        self.another_excluding(movies, Some(previous.id.as_str()))
    }

    /// Like [`another`](Self::another), with the previous suggestion given
    /// by id. `None` excludes nothing but still requires two candidates.
    pub fn another_excluding<'a>(
        &mut self,
        movies: &'a [Movie],
        previous_id: Option<&str>,
    ) -> Suggestion<'a> {
        let unwatched: Vec<&Movie> = movies.iter().filter(|m| !m.watched).collect();
        if unwatched.len() <= 1 {
            debug!(
                "Only {} unwatched movies, refusing to repeat a suggestion",
                unwatched.len()
            );
            return Suggestion::NoCandidates;
        }

        let others: Vec<&Movie> = unwatched
            .into_iter()
            .filter(|m| Some(m.id.as_str()) != previous_id)
            .collect();
        debug!("Suggesting another from {} candidates", others.len());
        self.pick(&others)
    }

    /// Uniform draw from the candidates
    fn pick<'a>(&mut self, candidates: &[&'a Movie]) -> Suggestion<'a> {
        if candidates.is_empty() {
            return Suggestion::NoCandidates;
        }
        let index = self.rng.random_range(0..candidates.len());
        Suggestion::Movie(candidates[index])
    }
}
