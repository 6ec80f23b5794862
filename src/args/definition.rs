//! Command-line argument definition and dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// brief - offline browser for tldr-pages cheat sheets
#[derive(Parser, Debug)]
#[command(name = "brief")]
#[command(version)]
#[command(about = "Offline browser for tldr-pages cheat sheets", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read settings from this file instead of ~/.config/brief/brief.conf
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Actions supported by the command line.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List languages available in the active cache
    Languages,
    /// List platforms available in the active cache
    Platforms,
    /// Fuzzy-search enabled commands
    Search {
        /// Query text
        query: String,
        /// Maximum number of results to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
        /// Minimum score (0-10000) for a result to be shown
        #[arg(long)]
        min_score: Option<u32>,
    },
    /// Print a page
    Show {
        /// Command name
        command: String,
        /// Language code (default: first enabled language that has the page)
        #[arg(short, long)]
        language: Option<String>,
        /// Platform code (default: first enabled platform that has the page)
        #[arg(short, long)]
        platform: Option<String>,
    },
    /// Download the latest pages archive and replace the local cache
    Refresh,
    /// Write commands.json for a pages tree (pages.<lang>/<platform>/<cmd>.md)
    Index {
        /// Root directory containing pages.* directories
        dir: PathBuf,
    },
}

/// What: Run the selected subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `true` on success, `false` when the command failed (the caller maps it to the exit code).
pub async fn process_args(args: &Args) -> bool {
    let settings = args.config.as_deref().map_or_else(
        brief::settings::load_settings,
        brief::settings::load_settings_from,
    );
    match &args.command {
        Command::Languages => super::list::handle_languages(&settings),
        Command::Platforms => super::list::handle_platforms(&settings),
        Command::Search {
            query,
            limit,
            min_score,
        } => super::search::handle_search(&settings, query, *limit, *min_score),
        Command::Show {
            command,
            language,
            platform,
        } => super::show::handle_show(
            &settings,
            command,
            language.as_deref(),
            platform.as_deref(),
        ),
        Command::Refresh => super::refresh::handle_refresh(&settings).await,
        Command::Index { dir } => super::index::handle_index(dir),
    }
}
