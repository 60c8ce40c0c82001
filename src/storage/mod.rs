//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - videos(video_id, title, ..., view_count, like_count, comment_count, created_at, updated_at)
//! - video_statistics(id, video_id, view_count, like_count, comment_count, recorded_at)
//! - channels(channel_id, channel_title, subscriber_count, video_count, view_count, created_at, updated_at)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SaveOutcome, SqliteStore};
