use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use catalog::{Film, Genre, InMemoryRatingStore, RatingGraph, RatingStore, UserId};
use engine::{PopularityQuery, RankedFilm, Recommender};

/// CineCircle - film recommendations from the people who rate like you
#[derive(Parser)]
#[command(name = "cine-circle")]
#[command(about = "Film recommendation engine based on user taste similarity", long_about = None)]
struct Cli {
    /// Path to the catalogue data directory
    #[arg(short, long, default_value = "data/catalog")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend films liked by the users closest to this one
    Recommend {
        /// User ID to recommend for
        #[arg(long)]
        user_id: UserId,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the best-rated films in the catalogue
    Popular {
        /// Number of films to show
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Only rank films carrying this genre
        #[arg(long)]
        genre: Option<Genre>,

        /// Only rank films released this year
        #[arg(long)]
        year: Option<u16>,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a user's marks and taste summary
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// Run concurrent recommendation requests and report latencies
    Bench {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of requests in flight at once
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalogue from {}...", cli.data_dir.display());
    let start = Instant::now();
    let store = InMemoryRatingStore::load_from_files(&cli.data_dir)
        .context("Failed to load catalogue")?;
    println!(
        "{} Loaded {} films and {} marks in {:?}",
        "✓".green(),
        store.film_count(),
        store.rating_count(),
        start.elapsed()
    );

    let recommender = Recommender::new(store);

    match cli.command {
        Commands::Recommend { user_id, json } => handle_recommend(&recommender, user_id, json)?,
        Commands::Popular {
            limit,
            genre,
            year,
            json,
        } => handle_popular(&recommender, limit, genre, year, json)?,
        Commands::User { user_id } => handle_user(&recommender, user_id)?,
        Commands::Bench {
            requests,
            concurrent,
        } => handle_bench(Arc::new(recommender), requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    recommender: &Recommender<InMemoryRatingStore>,
    user_id: UserId,
    json: bool,
) -> Result<()> {
    let films = recommender.find_recommendations(user_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&films)?);
        return Ok(());
    }

    if films.is_empty() {
        println!(
            "No recommendations for user {} yet; they need marks that overlap with other users.",
            user_id
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Recommendations for user {}:", user_id).bold().blue()
    );
    for (idx, film) in films.iter().enumerate() {
        println!("{}. {}", (idx + 1).to_string().green(), describe_film(film));
    }
    Ok(())
}

/// Handle the 'popular' command
fn handle_popular(
    recommender: &Recommender<InMemoryRatingStore>,
    limit: usize,
    genre: Option<Genre>,
    year: Option<u16>,
    json: bool,
) -> Result<()> {
    let mut query = PopularityQuery::top(limit);
    if let Some(genre) = genre {
        query = query.with_genre(genre);
    }
    if let Some(year) = year {
        query = query.with_year(year);
    }

    let ranked = recommender.popular_films(&query)?;

    if json {
        let entries: Vec<serde_json::Value> = ranked
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "film": entry.film,
                    "mean_mark": entry.mean_mark,
                    "mark_count": entry.mark_count,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("No rated films match that query.");
        return Ok(());
    }

    println!("{}", "Best-rated films:".bold().blue());
    for (idx, entry) in ranked.iter().enumerate() {
        let RankedFilm {
            film,
            mean_mark,
            mark_count,
        } = entry;
        println!(
            "{}. {} - mean {:.2} over {} marks",
            (idx + 1).to_string().green(),
            describe_film(film),
            mean_mark,
            mark_count
        );
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(recommender: &Recommender<InMemoryRatingStore>, user_id: UserId) -> Result<()> {
    let store = recommender.store();
    let graph = RatingGraph::from_snapshot(store.all_ratings()?);
    let marks = graph.user_ratings(user_id);

    println!("{}", format!("User {}", user_id).bold().blue());
    if marks.is_empty() {
        println!("No marks recorded.");
        return Ok(());
    }

    let total: u32 = marks.iter().map(|r| r.value as u32).sum();
    let mean = total as f64 / marks.len() as f64;
    println!("{}Marks placed: {}", "• ".cyan(), marks.len());
    println!("{}Mean mark given: {:.2}", "• ".cyan(), mean);

    // Best-marked films first.
    let mut by_mark: Vec<_> = marks.to_vec();
    by_mark.sort_by(|a, b| b.value.cmp(&a.value).then(a.film_id.cmp(&b.film_id)));
    println!("Top marked films:");
    for rating in by_mark.iter().take(5) {
        let film = store.film_by_id(rating.film_id)?;
        println!("  - {} (mark {})", film.title, rating.value);
    }

    // Mean mark per genre across everything the user marked.
    let mut genre_marks: HashMap<Genre, (u32, u32)> = HashMap::new();
    for rating in marks {
        let film = store.film_by_id(rating.film_id)?;
        for genre in &film.genres {
            let entry = genre_marks.entry(*genre).or_insert((0, 0));
            entry.0 += rating.value as u32;
            entry.1 += 1;
        }
    }
    if !genre_marks.is_empty() {
        println!("Genre preferences:");
        let mut genres: Vec<_> = genre_marks.into_iter().collect();
        genres.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        for (genre, (sum, count)) in genres {
            let avg = sum as f64 / count as f64;
            println!("  - {}: mean {:.2} ({} marks)", genre, avg, count);
        }
    }
    Ok(())
}

/// Handle the 'bench' command
async fn handle_bench(
    recommender: Arc<Recommender<InMemoryRatingStore>>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let user_ids = recommender.store().user_ids();
    if user_ids.is_empty() {
        bail!("No rated users in the catalogue, nothing to benchmark");
    }
    if requests == 0 || concurrent == 0 {
        bail!("--requests and --concurrent must be at least 1");
    }

    // A permit travels into each task, capping how many run at once.
    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrent));

    let wall_start = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let recommender = Arc::clone(&recommender);
        let user_id = user_ids[rand::random::<u32>() as usize % user_ids.len()];
        handles.push(tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            recommender.find_recommendations(user_id)?;
            drop(permit);
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = wall_start.elapsed();

    let total: std::time::Duration = timings.iter().sum();
    let avg_latency = total / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    let p99 = timings[((timings.len() as f32 * 0.99) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// One-line film description: title, genres, age rating
fn describe_film(film: &Film) -> String {
    let genres = film
        .genres
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    match film.mpa {
        Some(mpa) => format!("{} [{}] ({})", film.title, genres, mpa),
        None => format!("{} [{}]", film.title, genres),
    }
}
