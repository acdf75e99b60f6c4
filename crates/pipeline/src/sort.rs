//! Ordering of the derived view.
//!
//! Sorting is stable: movies with equal keys keep the order they had after
//! filtering, which is the collection order. Descending order reverses the
//! comparison, not the result, so ties stay stable in both directions.

use crate::config::{SortBy, SortOrder};
use collection::Movie;
use std::cmp::Ordering;

/// Compare two movies by the selected key
pub fn compare(a: &Movie, b: &Movie, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Alphabetical => locale_cmp(&a.title, &b.title),
        SortBy::Year => a.year.cmp(&b.year),
        SortBy::OrderNumber => a.order_number.cmp(&b.order_number),
    }
}

/// Sort movies in place by key and direction
pub fn sort_movies(movies: &mut [Movie], sort_by: SortBy, sort_order: SortOrder) {
    movies.sort_by(|a, b| {
        let ordering = compare(a, b, sort_by);
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Human-oriented title comparison.
///
/// Letters compare by their base form first, so case and common Latin
/// accents do not split the alphabet ("amélie" sorts between "Alien" and
/// "Batman"). Remaining ties put lowercase before uppercase and unaccented
/// before accented, then fall back to code points.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a.chars().map(base_letter).cmp(b.chars().map(base_letter));
    primary
        .then_with(|| {
            a.chars()
                .map(tertiary_weight)
                .cmp(b.chars().map(tertiary_weight))
        })
        .then_with(|| a.cmp(b))
}

/// Lowercased letter with diacritics stripped
fn base_letter(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' | 'ś' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        'ł' => 'l',
        other => other,
    }
}

/// Tie-break weight: plain lowercase < accented < uppercase
fn tertiary_weight(c: char) -> u8 {
    let accented = base_letter(c) != c.to_lowercase().next().unwrap_or(c);
    match (c.is_uppercase(), accented) {
        (false, false) => 0,
        (false, true) => 1,
        (true, false) => 2,
        (true, true) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_cmp_ignores_case_for_primary_order() {
        assert_eq!(locale_cmp("alien", "Batman"), Ordering::Less);
        assert_eq!(locale_cmp("Zodiac", "avatar"), Ordering::Greater);
    }

    #[test]
    fn test_locale_cmp_accents_sort_with_base_letter() {
        assert_eq!(locale_cmp("Amélie", "Amen"), Ordering::Less);
        assert_eq!(locale_cmp("Élite", "Fargo"), Ordering::Less);
    }

    #[test]
    fn test_locale_cmp_tie_breaks() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
        assert_eq!(locale_cmp("Heat", "Heat"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_prefix_sorts_first() {
        assert_eq!(locale_cmp("Alien", "Aliens"), Ordering::Less);
    }
}
