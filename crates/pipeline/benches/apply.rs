//! Benchmarks for the derived view
//!
//! Run with: cargo bench --package pipeline
//!
//! Builds a synthetic collection far larger than a personal watchlist and
//! measures a cleared view, a fully constrained view and an alphabetical sort.

use collection::{Collection, Movie};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::{apply, FilterConfiguration, SortBy, SortOrder};

const GENRES: &[&str] = &["Action", "Comedy, Drama", "Horror, Thriller", "Science Fiction"];

fn load_test_data() -> Collection {
    let movies = (1..=10_000u32).map(|i| Movie {
        id: format!("movie-{}", i),
        title: format!("Title {}", (i * 7919) % 10_000),
        year: 1900 + (i % 125) as i32,
        genre: GENRES[i as usize % GENRES.len()].to_string(),
        rating: f64::from(i % 100) / 10.0,
        poster: String::new(),
        watched: i % 3 == 0,
        tmdb_id: i,
        order_number: u64::from(i),
    });
    Collection::from_movies(movies)
}

fn bench_cleared_view(c: &mut Criterion) {
    let collection = load_test_data();
    let filters = FilterConfiguration::default();

    c.bench_function("apply_cleared", |b| {
        b.iter(|| black_box(apply(black_box(collection.movies()), &filters, "")))
    });
}

fn bench_constrained_view(c: &mut Criterion) {
    let collection = load_test_data();
    let mut filters = FilterConfiguration::default();
    filters.genre = "drama".to_string();
    filters.year = "19".to_string();
    filters.watched = Some(false);
    filters.set_rating(Some(5.0));

    c.bench_function("apply_constrained", |b| {
        b.iter(|| black_box(apply(black_box(collection.movies()), &filters, "title 1")))
    });
}

fn bench_alphabetical_sort(c: &mut Criterion) {
    let collection = load_test_data();
    let mut filters = FilterConfiguration::default();
    filters.sort_by = SortBy::Alphabetical;
    filters.sort_order = SortOrder::Desc;

    c.bench_function("apply_alphabetical", |b| {
        b.iter(|| black_box(apply(black_box(collection.movies()), &filters, "")))
    });
}

criterion_group!(
    benches,
    bench_cleared_view,
    bench_constrained_view,
    bench_alphabetical_sort
);
criterion_main!(benches);
