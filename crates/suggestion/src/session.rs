//! A suggestion session remembers the current suggestion so that "another"
//! can avoid repeating it.

use crate::selector::{RandomSuggestionSelector, Suggestion};
use collection::{Movie, MovieId};
use rand::rngs::ThreadRng;
use rand::Rng;

/// Tracks the single suggestion currently shown to the user.
///
/// Only the id of the last suggestion is kept; the movie itself is always
/// read from the caller's collection, so a session never holds stale data.
pub struct SuggestionSession<R = ThreadRng> {
    selector: RandomSuggestionSelector<R>,
    current: Option<MovieId>,
}

impl SuggestionSession<ThreadRng> {
    pub fn new() -> Self {
        Self::with_selector(RandomSuggestionSelector::new())
    }
}

impl Default for SuggestionSession<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SuggestionSession<R> {
    pub fn with_selector(selector: RandomSuggestionSelector<R>) -> Self {
        Self {
            selector,
            current: None,
        }
    }

    /// Start over with a fresh suggestion
    pub fn suggest<'a>(&mut self, movies: &'a [Movie]) -> Suggestion<'a> {
        let suggestion = self.selector.suggest(movies);
        self.remember(suggestion);
        suggestion
    }

    /// Replace the current suggestion with a different one
    pub fn another<'a>(&mut self, movies: &'a [Movie]) -> Suggestion<'a> {
        let suggestion = self
            .selector
            .another_excluding(movies, self.current.as_deref());
        self.remember(suggestion);
        suggestion
    }

    /// Id of the movie currently suggested
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Continue a session whose last suggestion was shown elsewhere
    pub fn resume(&mut self, current: MovieId) {
        self.current = Some(current);
    }

    /// End the session, returning the last suggestion's id
    pub fn close(&mut self) -> Option<MovieId> {
        self.current.take()
    }

    fn remember(&mut self, suggestion: Suggestion<'_>) {
        self.current = suggestion.movie().map(|m| m.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn movie(id: &str, watched: bool) -> Movie {
        Movie {
            id: id.to_string(),
            title: id.to_string(),
            year: 1999,
            genre: String::new(),
            rating: 6.0,
            poster: String::new(),
            watched,
            tmdb_id: 1,
            order_number: 1,
        }
    }

    fn session() -> SuggestionSession<StdRng> {
        SuggestionSession::with_selector(RandomSuggestionSelector::with_rng(
            StdRng::seed_from_u64(2024),
        ))
    }

    #[test]
    fn test_session_alternates_between_two_movies() {
        let movies = vec![movie("a", false), movie("b", false)];
        let mut session = session();

        let mut last = session.suggest(&movies).movie().unwrap().id.clone();
        for _ in 0..20 {
            let next = session.another(&movies).movie().unwrap().id.clone();
            assert_ne!(next, last);
            assert_eq!(session.current(), Some(next.as_str()));
            last = next;
        }
    }

    #[test]
    fn test_no_candidates_clears_current() {
        let mut movies = vec![movie("a", false), movie("b", false)];
        let mut session = session();
        assert!(session.suggest(&movies).movie().is_some());

        movies[0].watched = true;
        movies[1].watched = true;
        assert!(session.another(&movies).is_no_candidates());
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_resume_excludes_previous() {
        let movies = vec![movie("a", false), movie("b", false)];
        let mut session = session();
        for _ in 0..10 {
            session.resume("a".to_string());
            assert_eq!(session.another(&movies).movie().unwrap().id, "b");
        }
    }

    #[test]
    fn test_close() {
        let movies = vec![movie("a", false)];
        let mut session = session();
        session.suggest(&movies);

        assert_eq!(session.close(), Some("a".to_string()));
        assert_eq!(session.current(), None);
    }
}
