//! Shorts Tracker CLI - track YouTube Shorts metadata and engagement over time

mod commands;
mod output;

use clap::{Parser, Subcommand};
use output::{emit_error, OutputMode};
use shorts_tracker::config::{self, Settings};
use shorts_tracker::tracker::DEFAULT_HISTORY_LIMIT;
use shorts_tracker::youtube::MetadataSource;
use shorts_tracker::{ui, SqliteStore, Tracker, VideoSort, YouTubeClient};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "shorts")]
#[command(version)]
#[command(about = "Track YouTube Shorts metadata and engagement statistics over time")]
#[command(long_about = r#"
Shorts Tracker keeps a local SQLite record of YouTube Shorts:
  • Video metadata snapshots
  • A view/like/comment history for every refresh
  • Aggregate statistics over everything tracked

Requires a YouTube Data API v3 key in YOUTUBE_API_KEY (or .env / shorts.toml).

Example usage:
  shorts add https://youtube.com/shorts/dQw4w9WgXcQ
  shorts update-all
  shorts list --sort views
  shorts stats dQw4w9WgXcQ
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (default: shorts.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start tracking a video from its URL or ID
    Add {
        /// YouTube URL (watch, shorts, youtu.be, embed) or 11-character video ID
        url_or_id: String,
    },

    /// List tracked videos
    List {
        /// Maximum number of videos to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Sort order as `field[:asc|desc]` (updated, created, published, views, likes, comments, title)
        #[arg(short, long, default_value = "updated:desc")]
        sort: VideoSort,
    },

    /// Refresh one video and record a statistics sample
    Update {
        /// Video ID
        video_id: String,
    },

    /// Refresh every tracked video
    UpdateAll,

    /// Show history for one video, or a summary of all videos
    Stats {
        /// Video ID (omit for the summary)
        video_id: Option<String>,

        /// Number of most recent samples to consider
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        history: usize,
    },

    /// Search YouTube for shorts (results are not stored)
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value = "10")]
        max_results: usize,
    },

    /// Stop tracking a video and drop its history
    Remove {
        /// Video ID
        video_id: String,
    },

    /// Fetch and store a channel snapshot
    Channel {
        /// Channel ID
        channel_id: String,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "add",
            Commands::List { .. } => "list",
            Commands::Update { .. } => "update",
            Commands::UpdateAll => "update-all",
            Commands::Stats { .. } => "stats",
            Commands::Search { .. } => "search",
            Commands::Remove { .. } => "remove",
            Commands::Channel { .. } => "channel",
        }
    }
}

/// Failures are already printed through `ui`, so their log lines only show with `--verbose`
const FAILURE_LOG_LEVEL: tracing::Level = tracing::Level::DEBUG;

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

/// `RUST_LOG` wins over `--verbose`
fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose))
        .init();

    let output_mode = OutputMode::from_flag(cli.json);

    let file_config = config::load_config(cli.config.as_deref())?;
    let settings = match Settings::from_env(file_config, cli.database.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::event!(FAILURE_LOG_LEVEL, "configuration rejected: {}", e);
            ui::error(&e.to_string());
            emit_error(output_mode, cli.command.name(), &e.to_string())?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let command = cli.command.name();
    if let Err(e) = run(cli.command, &settings, output_mode) {
        let fatal = e
            .downcast_ref::<shorts_tracker::Error>()
            .is_some_and(shorts_tracker::Error::is_fatal);

        tracing::event!(FAILURE_LOG_LEVEL, "{} failed: {:#}", command, e);
        if output_mode.is_human() {
            ui::error(&format!("{:#}", e));
        } else {
            emit_error(output_mode, command, &format!("{:#}", e))?;
        }

        if fatal {
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run(command: Commands, settings: &Settings, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = SqliteStore::open(&settings.database)?;
    tracing::debug!("Opened database {}", store.path().display());
    let client = YouTubeClient::from_settings(settings)?;
    let source: &dyn MetadataSource = &client;
    let tracker = Tracker::new(&store, source);

    match command {
        Commands::Add { url_or_id } => commands::run_add(&tracker, output_mode, &url_or_id),
        Commands::List { limit, sort } => commands::run_list(&tracker, output_mode, limit, sort),
        Commands::Update { video_id } => commands::run_update(&tracker, output_mode, &video_id),
        Commands::UpdateAll => commands::run_update_all(&tracker, output_mode),
        Commands::Stats { video_id, history } => {
            commands::run_stats(&tracker, output_mode, video_id.as_deref(), history)
        }
        Commands::Search { query, max_results } => {
            commands::run_search(&tracker, output_mode, &query, max_results)
        }
        Commands::Remove { video_id } => commands::run_remove(&tracker, output_mode, &video_id),
        Commands::Channel { channel_id } => commands::run_channel(&tracker, output_mode, &channel_id),
    }
}
