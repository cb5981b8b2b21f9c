use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use top_deck::api::routes::FilterParams;
use top_deck::api::state::AppState;
use top_deck::calculate::Dashboard;
use top_deck::config::AppConfig;
use top_deck::models::{ranking_class_label, FilterSpec, FrequencyTable};
use top_deck::storage::DatasetLoader;

#[derive(Parser)]
#[command(name = "top-deck")]
#[command(about = "Magic tournament top-deck statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Results CSV (overrides the configured data file)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Dashboard filter controls shared by the view commands.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// First year of the range (inclusive)
    #[arg(long)]
    from: Option<i32>,

    /// Last year of the range (inclusive)
    #[arg(long)]
    to: Option<i32>,

    /// Format to keep ("All formats" keeps every format)
    #[arg(long)]
    format: Option<String>,

    /// Ranking classes, comma-separated (e.g. "1st,2nd")
    #[arg(long)]
    classes: Option<String>,

    /// First rank of the deck window (1-based)
    #[arg(long)]
    start: Option<u32>,

    /// Last rank of the deck window (inclusive)
    #[arg(long)]
    end: Option<u32>,
}

impl From<FilterArgs> for FilterParams {
    fn from(args: FilterArgs) -> Self {
        FilterParams {
            from: args.from,
            to: args.to,
            format: args.format,
            classes: args.classes,
            start: args.start,
            end: args.end,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Deck and competition counts for the selection
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Share of each format over the year range
    Formats {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Competitions per year and format
    Competitions {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Most played decks over all placements
    MostPlayed {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Decks finishing in the selected ranking classes
    TopDecks {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Random sample of a deck's placements
    Deck {
        /// Deck name
        name: String,

        /// Rows to show (capped by the configured maximum)
        #[arg(long)]
        max_rows: Option<usize>,

        /// Seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Placement table, newest first
    Database {
        /// Rows to show
        #[arg(long, default_value = "20")]
        limit: usize,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Start the API server
    Serve {
        /// Bind address (overrides the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the configured port)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_file_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting top-deck v{}", env!("CARGO_PKG_VERSION"));

    let loader = DatasetLoader::new(config.data_file.clone());
    let dataset = loader.load()?;

    match cli.command {
        Commands::Summary { filter } => {
            let spec = resolve(filter, &dataset, &config)?;
            let dashboard = Dashboard::new(dataset.records(), &spec)?;
            let summary = dashboard.summary();

            println!("{}", spec.title());
            println!("  Decks:        {}", summary.decks);
            println!("  Competitions: {}", summary.competitions);
        }
        Commands::Formats { filter } => {
            let spec = resolve(filter, &dataset, &config)?;
            let dashboard = Dashboard::new(dataset.records(), &spec)?;

            println!(
                "Formats ({} - {})",
                spec.year_range.min, spec.year_range.max
            );
            for row in dashboard.format_shares() {
                println!(
                    "  {:<20} {:>6}  {:>5.1}%",
                    row.key,
                    row.count,
                    row.share * 100.0
                );
            }
        }
        Commands::Competitions { filter } => {
            let spec = resolve(filter, &dataset, &config)?;
            let dashboard = Dashboard::new(dataset.records(), &spec)?;

            println!("Competitions by year and format");
            for row in dashboard.competitions().rows() {
                println!("  {}  {:<20} {:>5}", row.year, row.format, row.count);
            }
        }
        Commands::MostPlayed { filter } => {
            let spec = resolve(filter, &dataset, &config)?;
            let dashboard = Dashboard::new(dataset.records(), &spec)?;
            let window = spec.rank_window;

            println!(
                "Best {} to {} decks most played (all classement)",
                window.start, window.end
            );
            print_ranked(&dashboard.most_played(), window.start);
        }
        Commands::TopDecks { filter } => {
            let spec = resolve(filter, &dataset, &config)?;
            let dashboard = Dashboard::new(dataset.records(), &spec)?;
            let window = spec.rank_window;
            let classes: Vec<String> = spec
                .ranking_classes
                .iter()
                .map(|&c| ranking_class_label(c))
                .collect();

            println!(
                "Best {} to {} decks finished in {} place",
                window.start,
                window.end,
                classes.join(", ")
            );
            print_ranked(&dashboard.top_decks(), window.start);
        }
        Commands::Deck {
            name,
            max_rows,
            seed,
            filter,
        } => {
            let spec = resolve(filter, &dataset, &config)?;
            let dashboard = Dashboard::new(dataset.records(), &spec)?;

            let limit = config.dashboard.detail_max_rows;
            let max_rows = max_rows.unwrap_or(limit).min(limit);
            let rows = dashboard.deck_details(name.trim(), max_rows, seed);

            if rows.is_empty() {
                println!("No placements for {} in {}", name.trim(), spec.title());
            } else {
                println!("{} ({} placements)", name.trim(), rows.len());
                for row in rows {
                    println!(
                        "  {:<10} {:<40} {:<24} {}",
                        row.date, row.competition, row.player, row.url
                    );
                }
            }
        }
        Commands::Database { limit, filter } => {
            let spec = resolve(filter, &dataset, &config)?;
            let dashboard = Dashboard::new(dataset.records(), &spec)?;
            let rows = dashboard.database();

            println!("{} ({} rows)", spec.title(), rows.len());
            for row in rows.iter().take(limit) {
                println!(
                    "  {:<10} {:<10} {:<40} {:<24} {:<6} {}",
                    row.date, row.format, row.competition, row.player, row.ranking, row.deck_name
                );
            }
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::new(Arc::clone(&dataset), config);
            let app = top_deck::api::build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn resolve(
    filter: FilterArgs,
    dataset: &top_deck::storage::Dataset,
    config: &AppConfig,
) -> Result<FilterSpec> {
    let spec = FilterParams::from(filter).resolve(dataset, &config.dashboard)?;
    tracing::debug!(title = %spec.title(), "Resolved filter");
    Ok(spec)
}

fn print_ranked(table: &FrequencyTable, first_rank: u32) {
    if table.is_empty() {
        println!("  (no decks)");
        return;
    }
    for (i, row) in table.iter().enumerate() {
        println!(
            "  {:>3}. {:<32} {:>5}",
            first_rank as usize + i,
            row.key,
            row.count
        );
    }
}
