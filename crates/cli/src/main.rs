use anyhow::{bail, Context, Result};
use catalog_client::{provider_url, Language, TmdbClient, WatchProvider};
use clap::{Args, Parser, Subcommand, ValueEnum};
use collection::Movie;
use colored::Colorize;
use pipeline::{FilterConfiguration, FilterType, RatingRange, SortBy, SortOrder, YearRange};
use std::path::PathBuf;
use std::sync::Arc;
use suggestion::Suggestion;
use tracing::debug;
use watchlist::{JsonFileStore, WatchlistService};

/// Watchlist - track the movies you want to see
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(about = "Personal movie watchlist backed by TMDB", long_about = None)]
struct Cli {
    /// JSON file holding the watchlist
    #[arg(short, long, env = "WATCHLIST_DATA", default_value = "watchlist.json")]
    data_file: PathBuf,

    /// TMDB API key, required for search, add and details
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: Option<String>,

    /// Override the TMDB API root
    #[arg(long, env = "TMDB_BASE_URL")]
    tmdb_base_url: Option<String>,

    /// Catalog language: en or es
    #[arg(short, long, env = "WATCHLIST_LANGUAGE", default_value = "en")]
    language: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the watchlist, filtered and sorted
    List(ListArgs),

    /// Search the catalog by title
    Search {
        /// Title to search for
        query: String,
    },

    /// Add a catalog movie to the watchlist
    Add {
        /// TMDB id of the movie (see `search`)
        tmdb_id: u32,
    },

    /// Mark a movie watched, or pending again
    Toggle {
        /// Watchlist id of the movie
        id: String,
    },

    /// Remove a movie from the watchlist
    Remove {
        /// Watchlist id of the movie
        id: String,
    },

    /// Suggest a random movie you have not watched yet
    Suggest {
        /// Suggest something other than this movie
        #[arg(long, value_name = "ID")]
        another: Option<String>,

        /// Mark the suggestion as watched right away
        #[arg(long)]
        watch: bool,
    },

    /// Show catalog details and where to stream a movie
    Details {
        /// TMDB id of the movie
        tmdb_id: u32,

        /// Region for streaming offers
        #[arg(long, default_value = "MX")]
        region: String,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Free-text title search
    #[arg(short, long, default_value = "")]
    query: String,

    /// Genre name or part of it
    #[arg(long)]
    genre: Option<String>,

    /// Year, or its first digits ("19" for the 1900s)
    #[arg(long, conflicts_with_all = ["year_min", "year_max"])]
    year: Option<String>,

    /// Lower bound of a year range
    #[arg(long)]
    year_min: Option<i32>,

    /// Upper bound of a year range
    #[arg(long)]
    year_max: Option<i32>,

    /// Minimum rating, 1 to 10
    #[arg(long, conflicts_with_all = ["rating_min", "rating_max"])]
    min_rating: Option<String>,

    /// Lower bound of a rating range
    #[arg(long)]
    rating_min: Option<f64>,

    /// Upper bound of a rating range
    #[arg(long)]
    rating_max: Option<f64>,

    /// Only watched movies
    #[arg(long, conflicts_with = "pending")]
    watched: bool,

    /// Only movies not watched yet
    #[arg(long)]
    pending: bool,

    /// Sort key
    #[arg(long, value_enum, default_value_t = SortKey::Order)]
    sort: SortKey,

    /// Sort descending
    #[arg(long)]
    desc: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum SortKey {
    /// Order added
    #[default]
    Order,
    Alphabetical,
    Year,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let language = Language::from_code(&cli.language);
    debug!("Using {} with language {}", cli.data_file.display(), language.tmdb_code());

    let store = Arc::new(JsonFileStore::new(&cli.data_file));
    let mut service = WatchlistService::new(store).with_language(language);
    if let Some(api_key) = cli.tmdb_api_key.as_deref() {
        let mut client = TmdbClient::new(api_key).context("Invalid TMDB configuration")?;
        if let Some(base_url) = cli.tmdb_base_url.as_deref() {
            client = client.with_base_url(base_url);
        }
        service = service.with_catalog(Arc::new(client));
    }

    service
        .load()
        .await
        .with_context(|| format!("Failed to load {}", cli.data_file.display()))?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::List(args) => handle_list(&service, &args)?,
        Commands::Search { query } => handle_search(&service, &query).await?,
        Commands::Add { tmdb_id } => handle_add(&mut service, tmdb_id).await?,
        Commands::Toggle { id } => handle_toggle(&mut service, &id).await?,
        Commands::Remove { id } => handle_remove(&mut service, &id).await?,
        Commands::Suggest { another, watch } => {
            handle_suggest(&mut service, another.as_deref(), watch).await?
        }
        Commands::Details { tmdb_id, region } => {
            handle_details(&service, tmdb_id, &region).await?
        }
    }

    Ok(())
}

/// Turn `list` flags into a filter configuration
fn build_filters(args: &ListArgs) -> Result<FilterConfiguration> {
    let mut filters = FilterConfiguration::default();

    if let Some(genre) = &args.genre {
        filters.genre = genre.trim().to_string();
    }

    if let Some(year) = &args.year {
        filters.set_year_input(year)?;
    }
    match (args.year_min, args.year_max) {
        (None, None) => {}
        (Some(min), Some(max)) => {
            if min > max {
                bail!("--year-min {} is greater than --year-max {}", min, max);
            }
            filters.year_filter_type = FilterType::Range;
            filters.year_range = YearRange { min, max };
        }
        // A lone bound is kept as given; the default bound moves to meet it
        (Some(min), None) => {
            filters.year_filter_type = FilterType::Range;
            filters.year_range.min = min;
            filters.year_range.max = filters.year_range.max.max(min);
        }
        (None, Some(max)) => {
            filters.year_filter_type = FilterType::Range;
            filters.year_range.max = max;
            filters.year_range.min = filters.year_range.min.min(max);
        }
    }

    if let Some(rating) = &args.min_rating {
        filters.set_rating_input(rating)?;
    }
    match (args.rating_min, args.rating_max) {
        (None, None) => {}
        (Some(min), Some(max)) => {
            if min > max {
                bail!("--rating-min {} is greater than --rating-max {}", min, max);
            }
            filters.rating_filter_type = FilterType::Range;
            filters.rating_range = RatingRange { min, max };
        }
        // A lone bound is kept as given; the default bound moves to meet it
        (Some(min), None) => {
            filters.rating_filter_type = FilterType::Range;
            filters.rating_range.min = min;
            filters.rating_range.max = filters.rating_range.max.max(min);
        }
        (None, Some(max)) => {
            filters.rating_filter_type = FilterType::Range;
            filters.rating_range.max = max;
            filters.rating_range.min = filters.rating_range.min.min(max);
        }
    }

    if args.watched {
        filters.watched = Some(true);
    } else if args.pending {
        filters.watched = Some(false);
    }

    filters.sort_by = match args.sort {
        SortKey::Order => SortBy::OrderNumber,
        SortKey::Alphabetical => SortBy::Alphabetical,
        SortKey::Year => SortBy::Year,
    };
    if args.desc {
        filters.sort_order = SortOrder::Desc;
    }

    Ok(filters)
}

/// Handle the 'list' command
fn handle_list(service: &WatchlistService, args: &ListArgs) -> Result<()> {
    let filters = build_filters(args)?;
    let view = service.view(&filters, &args.query);

    let active = filters.active_filters();
    if active.is_empty() {
        println!("{}", "Watchlist".bold().blue());
    } else {
        println!("{} [{}]", "Watchlist".bold().blue(), active.join(", "));
    }

    if view.is_empty() {
        if service.collection().is_empty() {
            println!("Nothing here yet. Try `watchlist search <title>`.");
        } else {
            println!("No movies match these filters.");
        }
        return Ok(());
    }

    for movie in &view {
        print_movie(movie);
    }
    println!(
        "{} of {} movies",
        view.len().to_string().green(),
        service.collection().len()
    );
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(service: &WatchlistService, query: &str) -> Result<()> {
    let results = service.search_catalog(query).await?;

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if results.is_empty() {
        println!("No movies found.");
    }
    for result in results.iter().take(20) {
        let year = result
            .release_year()
            .map_or_else(|| "----".to_string(), |y| y.to_string());
        let tracked = if service.collection().contains_tmdb_id(result.id) {
            " (in watchlist)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "{:>8}  {} ({}) ★ {:.1}{}",
            result.id.to_string().cyan(),
            result.title,
            year,
            result.vote_average,
            tracked
        );
    }
    Ok(())
}

/// Handle the 'add' command
async fn handle_add(service: &mut WatchlistService, tmdb_id: u32) -> Result<()> {
    let id = service.add_by_tmdb_id(tmdb_id).await?;
    if let Some(movie) = service.collection().get(&id) {
        println!("{} Added {}", "✓".green(), movie.title.bold());
        print_movie(movie);
    }
    Ok(())
}

/// Handle the 'toggle' command
async fn handle_toggle(service: &mut WatchlistService, id: &str) -> Result<()> {
    let watched = service.toggle_watched(id).await?;
    let title = service
        .collection()
        .get(id)
        .map(|m| m.title.clone())
        .unwrap_or_default();
    if watched {
        println!("{} {} marked as watched", "✓".green(), title.bold());
    } else {
        println!("{} {} marked as pending", "•".yellow(), title.bold());
    }
    Ok(())
}

/// Handle the 'remove' command
async fn handle_remove(service: &mut WatchlistService, id: &str) -> Result<()> {
    let movie = service.remove(id).await?;
    println!("{} Removed {}", "✓".green(), movie.title.bold());
    Ok(())
}

/// Handle the 'suggest' command
async fn handle_suggest(
    service: &mut WatchlistService,
    another: Option<&str>,
    watch: bool,
) -> Result<()> {
    let suggestion = match another {
        Some(previous) => service.another_than(previous),
        None => service.suggest(),
    };
    print_suggestion(suggestion, another.is_some());

    if watch {
        if let Some(id) = service.watch_suggestion().await? {
            println!("{} {} marked as watched", "✓".green(), id);
        }
    }
    Ok(())
}

/// Handle the 'details' command
async fn handle_details(service: &WatchlistService, tmdb_id: u32, region: &str) -> Result<()> {
    let details = service.movie_details(tmdb_id, region).await?;
    let movie = &details.movie;

    let year = movie
        .release_year()
        .map_or_else(|| "----".to_string(), |y| y.to_string());
    println!("{} ({})", movie.title.bold().blue(), year);
    println!("{}{}", "• ".green(), movie.genre_field());
    println!("{}★ {:.1}", "• ".green(), movie.vote_average);
    if let Some(url) = &details.poster_url {
        println!("{}{}", "• ".green(), url);
    }
    if !movie.overview.is_empty() {
        println!("\n{}\n", movie.overview);
    }

    let Some(providers) = &details.providers else {
        println!("Not available to stream in {}.", details.region);
        return Ok(());
    };
    println!("{}", format!("Where to watch ({}):", details.region).bold());
    print_providers("Stream", &providers.flatrate, &movie.title);
    print_providers("Rent", &providers.rent, &movie.title);
    print_providers("Buy", &providers.buy, &movie.title);
    Ok(())
}

fn print_providers(label: &str, providers: &[WatchProvider], title: &str) {
    if providers.is_empty() {
        return;
    }
    println!("  {}:", label.cyan());
    for provider in providers {
        println!(
            "    {} {}",
            provider.provider_name,
            provider_url(&provider.provider_name, title).dimmed()
        );
    }
}

fn print_movie(movie: &Movie) {
    let status = if movie.watched {
        "✓".green()
    } else {
        "·".yellow()
    };
    println!(
        "{} {:<10} {} ({}) [{}] ★ {:.1}",
        status,
        movie.id.dimmed(),
        movie.title,
        movie.year,
        movie.genre,
        movie.rating
    );
}

fn print_suggestion(suggestion: Suggestion<'_>, another: bool) {
    match suggestion {
        Suggestion::Movie(movie) => {
            println!("{}", "How about...".bold().blue());
            println!(
                "  {} ({}) [{}] ★ {:.1}",
                movie.title.bold(),
                movie.year,
                movie.genre,
                movie.rating
            );
            println!("  id: {}", movie.id.dimmed());
        }
        Suggestion::NoCandidates if another => {
            println!("No other unwatched movie to suggest.");
        }
        Suggestion::NoCandidates => {
            println!("You have watched everything on your list. Time to add more!");
        }
    }
}
