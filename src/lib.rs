//! # Shorts Tracker - YouTube Shorts metadata & engagement history
//!
//! Keeps a local record of short-form videos and how their numbers move over time.
//!
//! Shorts Tracker provides:
//! - Video, channel and statistics-history records
//! - SQLite-backed storage with an append-only statistics time series
//! - A YouTube Data API v3 client behind the `MetadataSource` trait
//! - A tracker façade mapping user intents (add, update, stats, ...) to store and API calls
//! - Terminal UI helpers shared by the `shorts` binary

pub mod model;
pub mod video_id;
pub mod storage;
pub mod youtube;
pub mod tracker;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use model::{Channel, SortDirection, SortField, StatisticsSummary, StatsSample, Video, VideoSort};
pub use storage::{SaveOutcome, SqliteStore};
pub use tracker::Tracker;
pub use youtube::{MetadataSource, YouTubeClient};

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for tracker operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid video ID or URL: {0}")]
    InvalidVideoId(String),

    #[error("Remote API error: {0}")]
    Remote(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sort order: {0}")]
    InvalidSort(String),
}

impl Error {
    /// Configuration errors stop the process before any command runs
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
