use clap::{ArgAction, Parser, Subcommand};
use cineflix_config::PathManager;
use cineflix_models::{FilmYear, SortCriteria, SortOrder};
use color_eyre::eyre::eyre;
use commands::{catalog, config, films, health, session, watchlist, GlobalOptions};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;
mod tables;

#[derive(Parser)]
#[command(name = "cineflix")]
#[command(about = "CineFlix - Track the films you watch in theaters")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Configuration file (defaults to config.toml in the CineFlix config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// User id to act as, overriding the configured one
    #[arg(long, global = true, value_name = "ID")]
    user: Option<String>,

    /// Also write logs to a daily-rolling file in the config directory
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the health of every backend service
    Health,
    /// Search TMDB for a film
    Search {
        /// Film title to look for
        query: String,
    },
    /// Get a random film suggestion
    Wildcard {
        /// Limit the suggestion to a genre id (see `cineflix genres`)
        #[arg(long)]
        genre: Option<String>,
    },
    /// List genres the wildcard service can pick from
    Genres,
    /// Show trending films
    Trending {
        /// Trending films tailored to the user
        #[arg(long, action = ArgAction::SetTrue)]
        personalized: bool,
    },
    /// Show film recommendations for the user
    Recommend {
        /// Number of recommendations to request
        #[arg(long)]
        count: Option<u32>,
    },
    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Browse the watched-film collection
    #[command(long_about = "Load the watched-film collection from the backend services and list, sort or filter it. Sorting and filtering fall back to local computation when the sorting service is unavailable.")]
    Films {
        #[command(subcommand)]
        cmd: FilmsCommands,
    },
    /// Interactive session: add, rate, review and remove films
    Session,
    /// Show or write configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List watchlist entries
    List {
        /// Only entries with this status (want_to_watch, watching, watched)
        #[arg(long)]
        status: Option<String>,
    },
    /// Add a film to the watchlist
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        year: Option<FilmYear>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        poster: Option<String>,
    },
    /// Remove a film from the watchlist
    Remove { id: String },
    /// Change the status of a watchlist entry
    Status { id: String, status: String },
    /// Show release notifications
    Notifications,
    /// Set release notification preferences
    Notify {
        /// When to notify, e.g. day_of_release
        #[arg(long, default_value = "day_of_release")]
        timing: String,
        /// Turn notifications off
        #[arg(long, action = ArgAction::SetTrue)]
        disable: bool,
    },
    /// Show upcoming releases
    Upcoming,
}

#[derive(Subcommand)]
enum FilmsCommands {
    /// List watched films
    List,
    /// Sort watched films
    Sort {
        /// rating, year, watched-date or title
        #[arg(long, default_value = "rating")]
        by: SortCriteria,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: SortOrder,
    },
    /// Filter watched films
    Filter {
        /// Genre substring, case-insensitive
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        min_rating: Option<u8>,
        #[arg(long)]
        max_rating: Option<u8>,
        #[arg(long)]
        year: Option<FilmYear>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the TMDB API key used for film search
    TmdbKey {
        /// API key (prompted for when omitted)
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = if cli.log_file {
        let paths = PathManager::new().map_err(|e| eyre!("{}", e))?;
        Some(paths.log_dir().join(paths.log_file_name()))
    } else {
        None
    };
    logging::init_logging(cli.verbose, cli.quiet, log_file.as_deref()).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let options = GlobalOptions {
        config: cli.config,
        user: cli.user,
    };

    match cli.command {
        Commands::Health => health::run_health(&options, &output).await,
        Commands::Search { query } => catalog::run_search(&query, &options, &output).await,
        Commands::Wildcard { genre } => catalog::run_wildcard(genre.as_deref(), &options, &output).await,
        Commands::Genres => catalog::run_genres(&options, &output).await,
        Commands::Trending { personalized } => catalog::run_trending(personalized, &options, &output).await,
        Commands::Recommend { count } => catalog::run_recommend(count, &options, &output).await,
        Commands::Watchlist { cmd } => watchlist::run_watchlist(cmd, &options, &output).await,
        Commands::Films { cmd } => films::run_films(cmd, &options, &output).await,
        Commands::Session => session::run_session(&options, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &options, &output),
    }
}
