//! Stox CLI: intraday chart statistics and favorites.
//!
//! Commands:
//! - `chart`: fetch a symbol's intraday bars and print day/week high-low
//! - `favorites add|remove|list`: manage the persisted favorites set

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stox_core::config::StoxConfig;
use stox_core::domain::{normalize_symbol, Interval};
use stox_core::presenter::{ChartPresenter, PresentError};
use stox_core::store::FavoritesStore;
use stox_core::TickFetcher;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stox", about = "Stox: intraday stock charts and day/week high-low")]
struct Cli {
    /// Path to a TOML config file. Defaults to <config_dir>/stox/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preferences file holding the favorites. Overrides the config file.
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch intraday bars and print the latest day's chart statistics.
    Chart {
        /// Symbol to chart (e.g., AMZN). Required unless --favorites is set.
        symbol: Option<String>,

        /// Chart every favorite symbol in turn.
        #[arg(long, default_value_t = false, conflicts_with = "symbol")]
        favorites: bool,

        /// Bar interval: 1min, 5min, 15min, 30min, 60min. Defaults to the config value.
        #[arg(long)]
        interval: Option<Interval>,

        /// Also print every chart point of the latest day.
        #[arg(long, default_value_t = false)]
        points: bool,

        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Reference time for the week window (YYYY-MM-DD HH:MM). Defaults to now.
        #[arg(long)]
        now: Option<String>,
    },
    /// Manage favorite symbols.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Add a symbol to the favorites.
    Add { symbol: String },
    /// Remove a symbol from the favorites.
    Remove { symbol: String },
    /// List the favorites.
    List,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = StoxConfig::load(cli.config.as_deref())?;
    if let Some(prefs) = cli.prefs {
        config.storage.preferences_path = Some(prefs);
    }

    match cli.command {
        Commands::Chart {
            symbol,
            favorites,
            interval,
            points,
            json,
            now,
        } => run_chart(&config, symbol, favorites, interval, points, json, now),
        Commands::Favorites { action } => {
            let store = config.favorites_store()?;
            match action {
                FavoritesAction::Add { symbol } => run_favorite_add(&store, &symbol),
                FavoritesAction::Remove { symbol } => run_favorite_remove(&store, &symbol),
                FavoritesAction::List => run_favorite_list(&store),
            }
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_chart(
    config: &StoxConfig,
    symbol: Option<String>,
    favorites: bool,
    interval: Option<Interval>,
    points: bool,
    json: bool,
    now: Option<String>,
) -> Result<()> {
    let now = parse_now(now.as_deref())?;
    let store = if favorites {
        Some(config.favorites_store()?)
    } else {
        None
    };
    let symbols = select_symbols(symbol, store.as_ref())?;

    let provider = config.provider.build_provider()?;
    let presenter = ChartPresenter::new(
        TickFetcher::new(Box::new(provider)),
        interval.unwrap_or(config.chart.interval),
        config.aggregate_options(),
    );
    debug!(interval = %presenter.interval(), %now, count = symbols.len(), "charting");

    let not_found = chart_symbols(&presenter, &symbols, now, points, json)?;
    if not_found > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// `--now` as `YYYY-MM-DD HH:MM`, or the local wall clock.
fn parse_now(raw: Option<&str>) -> Result<NaiveDateTime> {
    match raw {
        Some(s) => NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M")
            .with_context(|| format!("invalid --now '{s}', expected YYYY-MM-DD HH:MM")),
        None => Ok(chrono::Local::now().naive_local()),
    }
}

/// Symbols to chart: every favorite when a store is given, else the argument.
fn select_symbols(symbol: Option<String>, favorites: Option<&FavoritesStore>) -> Result<Vec<String>> {
    if let Some(store) = favorites {
        let list = store.list();
        if list.is_empty() {
            bail!("no favorites yet, add one with `stox favorites add <SYMBOL>`");
        }
        return Ok(list.into_iter().collect());
    }
    match symbol {
        Some(s) => Ok(vec![s]),
        None => bail!("a symbol is required unless --favorites is set"),
    }
}

/// Print each symbol's chart. Returns how many were not found.
fn chart_symbols(
    presenter: &ChartPresenter,
    symbols: &[String],
    now: NaiveDateTime,
    points: bool,
    json: bool,
) -> Result<usize> {
    let mut not_found = 0;
    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 && !json {
            println!();
        }
        match presenter.present(symbol, now) {
            Ok(view) if json => println!("{}", serde_json::to_string_pretty(&view)?),
            Ok(view) => println!("{}", view.render(points)),
            Err(PresentError::NotFound { symbol }) => {
                not_found += 1;
                eprintln!("{symbol}: {}", stox_core::presenter::NOT_FOUND_MESSAGE);
            }
        }
    }
    Ok(not_found)
}

fn run_favorite_add(store: &FavoritesStore, symbol: &str) -> Result<()> {
    let added = store.add(symbol)?;
    let symbol = normalize_symbol(symbol).unwrap_or_default();
    if added {
        println!("Added {symbol} to favorites.");
    } else {
        println!("{symbol} is already a favorite.");
    }
    Ok(())
}

fn run_favorite_remove(store: &FavoritesStore, symbol: &str) -> Result<()> {
    let removed = store.remove(symbol)?;
    let symbol = normalize_symbol(symbol).unwrap_or_default();
    if removed {
        println!("Removed {symbol} from favorites.");
    } else {
        println!("{symbol} is not a favorite.");
    }
    Ok(())
}

fn run_favorite_list(store: &FavoritesStore) -> Result<()> {
    let favorites = store.list();
    if favorites.is_empty() {
        println!("No favorites. Preferences: {}", store.preferences().path().display());
        return Ok(());
    }
    for symbol in favorites {
        println!("{symbol}");
    }
    Ok(())
}
