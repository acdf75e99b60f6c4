//! Genre table and genre-string normalization.
//!
//! Records reach the store with a free-text, comma-separated `genre` field.
//! Older records contain raw TMDB genre ids ("28, 12"), the `Unknown` and
//! `noGenre` placeholders written when a lookup failed, or untranslated
//! `genres.*` keys. [`normalize_genre`] repairs all of these into a canonical
//! list of names so that substring matching downstream never has to parse.

/// TMDB movie genres (id, English name)
pub const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// Placeholder written for a genre id missing from [`GENRES`]
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Placeholder written when a catalog record has no genres at all
pub const NO_GENRE: &str = "noGenre";

const TRANSLATION_KEY_PREFIX: &str = "genres.";

/// Look up the name of a TMDB genre id
///
/// Example: 878 -> Some("Science Fiction")
pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

/// Find the canonical spelling of a genre name, ignoring case
fn canonical_name(name: &str) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(_, known)| known.eq_ignore_ascii_case(name))
        .map(|(_, known)| *known)
}

/// Repair a single comma-separated token.
///
/// Returns `None` for tokens that carry no genre information.
fn repair_token(token: &str) -> Option<String> {
    let mut token = token.trim();
    let prefix_len = TRANSLATION_KEY_PREFIX.len();
    if token
        .get(..prefix_len)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(TRANSLATION_KEY_PREFIX))
    {
        token = token[prefix_len..].trim();
    }

    if token.is_empty()
        || token.eq_ignore_ascii_case(UNKNOWN_GENRE)
        || token.eq_ignore_ascii_case(NO_GENRE)
    {
        return None;
    }

    if token.chars().all(|c| c.is_ascii_digit()) {
        return token
            .parse::<u32>()
            .ok()
            .and_then(genre_name)
            .map(str::to_string);
    }

    Some(
        canonical_name(token)
            .map(str::to_string)
            .unwrap_or_else(|| token.to_string()),
    )
}

/// Normalize a raw `genre` field into a canonical ", "-joined name list.
///
/// Example: "28, genres.comedy, Unknown, action" -> "Action, Comedy"
///
/// Never fails: anything that cannot be repaired is dropped.
pub fn normalize_genre(raw: &str) -> String {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(',').filter_map(repair_token) {
        if !names.iter().any(|seen| seen.eq_ignore_ascii_case(&name)) {
            names.push(name);
        }
    }
    names.join(", ")
}

/// Build a raw genre field from catalog genre ids, the way new records are
/// written: unmapped ids become `Unknown`, an empty list becomes `noGenre`.
pub fn genre_field_from_ids(ids: &[u32]) -> String {
    if ids.is_empty() {
        return NO_GENRE.to_string();
    }
    ids.iter()
        .map(|&id| genre_name(id).unwrap_or(UNKNOWN_GENRE))
        .collect::<Vec<_>>()
        .join(", ")
}
