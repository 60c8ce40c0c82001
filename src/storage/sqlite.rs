//! SQLite storage implementation

use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use crate::Result;
use crate::model::{Channel, StatisticsSummary, StatsSample, Video, VideoSort};
use super::schema;

const VIDEO_COLUMNS: &str = "video_id, title, description, channel_id, channel_title, published_at, duration, \
     view_count, like_count, comment_count, thumbnail_url, tags, category_id, created_at, updated_at";

const CHANNEL_COLUMNS: &str =
    "channel_id, channel_title, subscriber_count, video_count, view_count, created_at, updated_at";

/// Whether an upsert created a new row or overwrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

/// SQLite-backed storage for videos, their statistics history and channels.
///
/// The store only remembers where the database lives. Each operation opens
/// its own connection and drops it before returning.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open a database file (creates it and the schema if missing)
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path: path.to_path_buf() };
        store.initialize()?;
        Ok(store)
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure tables and indexes exist. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connect()?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    // ========== Video Operations ==========

    /// Insert or update a video and append one statistics sample, atomically.
    pub fn save_video(&self, video: &Video) -> Result<SaveOutcome> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let existing: Option<DateTime<Utc>> = tx
            .query_row(
                "SELECT updated_at FROM videos WHERE video_id = ?1",
                [&video.video_id],
                |row| row.get(0),
            )
            .optional()?;

        let now = monotonic_now(existing);

        let outcome = if existing.is_some() {
            tx.execute(
                r#"
                UPDATE videos SET
                    title = ?1, description = ?2, channel_id = ?3, channel_title = ?4,
                    published_at = ?5, duration = ?6, view_count = ?7, like_count = ?8,
                    comment_count = ?9, thumbnail_url = ?10, tags = ?11, category_id = ?12,
                    updated_at = ?13
                WHERE video_id = ?14
                "#,
                params![
                    video.title,
                    video.description,
                    video.channel_id,
                    video.channel_title,
                    video.published_at,
                    video.duration,
                    video.view_count,
                    video.like_count,
                    video.comment_count,
                    video.thumbnail_url,
                    video.tags,
                    video.category_id,
                    now,
                    video.video_id,
                ],
            )?;
            SaveOutcome::Updated
        } else {
            tx.execute(
                r#"
                INSERT INTO videos (video_id, title, description, channel_id, channel_title,
                    published_at, duration, view_count, like_count, comment_count,
                    thumbnail_url, tags, category_id, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)
                "#,
                params![
                    video.video_id,
                    video.title,
                    video.description,
                    video.channel_id,
                    video.channel_title,
                    video.published_at,
                    video.duration,
                    video.view_count,
                    video.like_count,
                    video.comment_count,
                    video.thumbnail_url,
                    video.tags,
                    video.category_id,
                    now,
                ],
            )?;
            SaveOutcome::Inserted
        };

        tx.execute(
            r#"
            INSERT INTO video_statistics (video_id, view_count, like_count, comment_count, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                video.video_id,
                video.view_count,
                video.like_count,
                video.comment_count,
                now,
            ],
        )?;

        tx.commit()?;
        tracing::debug!("Saved video {} ({:?})", video.video_id, outcome);
        Ok(outcome)
    }

    /// Get a video by ID
    pub fn get_video(&self, video_id: &str) -> Result<Option<Video>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {} FROM videos WHERE video_id = ?1", VIDEO_COLUMNS);
        conn.query_row(&sql, [video_id], Self::row_to_video)
            .optional()
            .map_err(Into::into)
    }

    /// Get every video in the requested order
    pub fn get_all_videos(&self, sort: VideoSort) -> Result<Vec<Video>> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT {} FROM videos ORDER BY {}, video_id",
            VIDEO_COLUMNS,
            sort.order_clause()
        );

        let mut stmt = conn.prepare(&sql)?;
        let videos = stmt
            .query_map([], Self::row_to_video)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(videos)
    }

    /// Most recent statistics samples for a video, newest first
    pub fn get_video_statistics_history(&self, video_id: &str, limit: usize) -> Result<Vec<StatsSample>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, video_id, view_count, like_count, comment_count, recorded_at
            FROM video_statistics
            WHERE video_id = ?1
            ORDER BY recorded_at DESC, id DESC
            LIMIT ?2
            "#,
        )?;

        let samples = stmt
            .query_map(params![video_id, limit as i64], Self::row_to_sample)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(samples)
    }

    /// Delete a video and its whole statistics history.
    ///
    /// Returns whether the video existed. Unknown IDs are not an error.
    pub fn delete_video(&self, video_id: &str) -> Result<bool> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let samples = tx.execute("DELETE FROM video_statistics WHERE video_id = ?1", [video_id])?;
        let videos = tx.execute("DELETE FROM videos WHERE video_id = ?1", [video_id])?;

        tx.commit()?;
        tracing::debug!("Deleted video {} ({} samples)", video_id, samples);
        Ok(videos > 0)
    }

    /// Count all videos
    #[cfg(test)]
    pub fn count_videos(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM videos", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Aggregate counts over every stored video
    pub fn get_statistics_summary(&self) -> Result<StatisticsSummary> {
        let conn = self.connect()?;
        let (total_videos, total_views, total_likes): (i64, i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(view_count), 0), COALESCE(SUM(like_count), 0) FROM videos",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(StatisticsSummary::from_totals(total_videos, total_views, total_likes))
    }

    /// Helper to convert a row to a Video
    fn row_to_video(row: &rusqlite::Row) -> rusqlite::Result<Video> {
        Ok(Video {
            video_id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            channel_id: row.get(3)?,
            channel_title: row.get(4)?,
            published_at: row.get(5)?,
            duration: row.get(6)?,
            view_count: row.get(7)?,
            like_count: row.get(8)?,
            comment_count: row.get(9)?,
            thumbnail_url: row.get(10)?,
            tags: row.get(11)?,
            category_id: row.get(12)?,
            created_at: Some(row.get(13)?),
            updated_at: Some(row.get(14)?),
        })
    }

    /// Helper to convert a row to a StatsSample
    fn row_to_sample(row: &rusqlite::Row) -> rusqlite::Result<StatsSample> {
        Ok(StatsSample {
            id: row.get(0)?,
            video_id: row.get(1)?,
            view_count: row.get(2)?,
            like_count: row.get(3)?,
            comment_count: row.get(4)?,
            recorded_at: row.get(5)?,
        })
    }

    // ========== Channel Operations ==========

    /// Insert or update a channel snapshot
    pub fn save_channel(&self, channel: &Channel) -> Result<SaveOutcome> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let existing: Option<DateTime<Utc>> = tx
            .query_row(
                "SELECT updated_at FROM channels WHERE channel_id = ?1",
                [&channel.channel_id],
                |row| row.get(0),
            )
            .optional()?;

        let now = monotonic_now(existing);

        let outcome = if existing.is_some() {
            tx.execute(
                r#"
                UPDATE channels SET
                    channel_title = ?1, subscriber_count = ?2, video_count = ?3,
                    view_count = ?4, updated_at = ?5
                WHERE channel_id = ?6
                "#,
                params![
                    channel.channel_title,
                    channel.subscriber_count,
                    channel.video_count,
                    channel.view_count,
                    now,
                    channel.channel_id,
                ],
            )?;
            SaveOutcome::Updated
        } else {
            tx.execute(
                r#"
                INSERT INTO channels (channel_id, channel_title, subscriber_count,
                    video_count, view_count, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                "#,
                params![
                    channel.channel_id,
                    channel.channel_title,
                    channel.subscriber_count,
                    channel.video_count,
                    channel.view_count,
                    now,
                ],
            )?;
            SaveOutcome::Inserted
        };

        tx.commit()?;
        tracing::debug!("Saved channel {} ({:?})", channel.channel_id, outcome);
        Ok(outcome)
    }

    /// Get a channel by ID
    pub fn get_channel(&self, channel_id: &str) -> Result<Option<Channel>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {} FROM channels WHERE channel_id = ?1", CHANNEL_COLUMNS);
        conn.query_row(&sql, [channel_id], |row| {
            Ok(Channel {
                channel_id: row.get(0)?,
                channel_title: row.get(1)?,
                subscriber_count: row.get(2)?,
                video_count: row.get(3)?,
                view_count: row.get(4)?,
                created_at: Some(row.get(5)?),
                updated_at: Some(row.get(6)?),
            })
        })
        .optional()
        .map_err(Into::into)
    }
}

/// Current time, never earlier than the previously stored update time
fn monotonic_now(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(previous) if previous > now => previous,
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SortDirection, SortField};
    use tempfile::TempDir;

    fn open_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(&dir.path().join("shorts.db")).unwrap();
        (dir, store)
    }

    fn sample_video(id: &str, views: i64) -> Video {
        Video {
            video_id: id.to_string(),
            title: format!("Video {}", id),
            description: "a short".to_string(),
            channel_id: "UC123".to_string(),
            channel_title: "Some Channel".to_string(),
            published_at: "2024-05-01T12:00:00Z".to_string(),
            duration: 42,
            view_count: views,
            like_count: views / 10,
            comment_count: views / 100,
            thumbnail_url: "https://i.ytimg.com/vi/x/hqdefault.jpg".to_string(),
            tags: "shorts,test".to_string(),
            category_id: "22".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (_dir, store) = open_store();
        store.initialize().unwrap();
        store.initialize().unwrap();
        assert_eq!(store.count_videos().unwrap(), 0);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data").join("shorts.db");
        SqliteStore::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_video_roundtrip() {
        let (_dir, store) = open_store();
        let video = sample_video("v1", 100);

        assert_eq!(store.save_video(&video).unwrap(), SaveOutcome::Inserted);

        let stored = store.get_video("v1").unwrap().unwrap();
        assert!(stored.created_at.is_some());
        assert!(stored.updated_at.is_some());
        assert_eq!(stored.created_at, stored.updated_at);
        assert_eq!(
            Video { created_at: None, updated_at: None, ..stored },
            video
        );
    }

    #[test]
    fn test_partial_record_defaults() {
        let (_dir, store) = open_store();
        store.save_video(&Video::new("partial")).unwrap();

        let stored = store.get_video("partial").unwrap().unwrap();
        assert_eq!(stored.title, "");
        assert_eq!(stored.view_count, 0);
        assert_eq!(stored.duration, 0);
    }

    #[test]
    fn test_get_missing_video() {
        let (_dir, store) = open_store();
        assert!(store.get_video("nope").unwrap().is_none());
    }

    #[test]
    fn test_update_preserves_created_at() {
        let (_dir, store) = open_store();
        store.save_video(&sample_video("v1", 100)).unwrap();
        let first = store.get_video("v1").unwrap().unwrap();

        let outcome = store.save_video(&sample_video("v1", 150)).unwrap();
        assert_eq!(outcome, SaveOutcome::Updated);

        let second = store.get_video("v1").unwrap().unwrap();
        assert_eq!(second.view_count, 150);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn test_history_appends_newest_first() {
        let (_dir, store) = open_store();
        store.save_video(&sample_video("v1", 100)).unwrap();
        store.save_video(&sample_video("v1", 150)).unwrap();
        store.save_video(&sample_video("other", 5)).unwrap();

        let history = store.get_video_statistics_history("v1", 100).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].view_count, 150);
        assert_eq!(history[1].view_count, 100);
        assert!(history[0].recorded_at >= history[1].recorded_at);
    }

    #[test]
    fn test_history_limit_and_empty() {
        let (_dir, store) = open_store();
        for views in [1, 2, 3, 4] {
            store.save_video(&sample_video("v1", views)).unwrap();
        }

        let history = store.get_video_statistics_history("v1", 2).unwrap();
        assert_eq!(history.iter().map(|s| s.view_count).collect::<Vec<_>>(), vec![4, 3]);
        assert!(store.get_video_statistics_history("unknown", 10).unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_history() {
        let (_dir, store) = open_store();
        store.save_video(&sample_video("v1", 100)).unwrap();
        store.save_video(&sample_video("v1", 120)).unwrap();
        store.save_video(&sample_video("v2", 7)).unwrap();

        assert!(store.delete_video("v1").unwrap());
        assert!(store.get_video("v1").unwrap().is_none());
        assert!(store.get_video_statistics_history("v1", 100).unwrap().is_empty());
        assert_eq!(store.get_video_statistics_history("v2", 100).unwrap().len(), 1);

        // Deleting again is a no-op
        assert!(!store.delete_video("v1").unwrap());
    }

    #[test]
    fn test_get_all_videos_ordering() {
        let (_dir, store) = open_store();
        store.save_video(&sample_video("low", 10)).unwrap();
        store.save_video(&sample_video("high", 1000)).unwrap();
        store.save_video(&sample_video("mid", 100)).unwrap();

        let by_views = store
            .get_all_videos(VideoSort::new(SortField::Views, SortDirection::Desc))
            .unwrap();
        let ids: Vec<_> = by_views.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);

        let by_views_asc = store
            .get_all_videos(VideoSort::new(SortField::Views, SortDirection::Asc))
            .unwrap();
        assert_eq!(by_views_asc[0].video_id, "low");

        let recent = store.get_all_videos(VideoSort::default()).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].video_id, "mid");
    }

    #[test]
    fn test_statistics_summary() {
        let (_dir, store) = open_store();
        let empty = store.get_statistics_summary().unwrap();
        assert_eq!(empty, StatisticsSummary::default());

        store.save_video(&sample_video("a", 100)).unwrap();
        store.save_video(&sample_video("b", 300)).unwrap();

        let summary = store.get_statistics_summary().unwrap();
        assert_eq!(summary.total_videos, 2);
        assert_eq!(summary.total_views, 400);
        assert_eq!(summary.total_likes, 40);
        assert_eq!(summary.average_views, 200.0);
    }

    #[test]
    fn test_channel_upsert() {
        let (_dir, store) = open_store();
        let mut channel = Channel::new("UC123");
        channel.channel_title = "Some Channel".to_string();
        channel.subscriber_count = 10;

        assert_eq!(store.save_channel(&channel).unwrap(), SaveOutcome::Inserted);
        let first = store.get_channel("UC123").unwrap().unwrap();

        channel.subscriber_count = 25;
        assert_eq!(store.save_channel(&channel).unwrap(), SaveOutcome::Updated);
        let second = store.get_channel("UC123").unwrap().unwrap();

        assert_eq!(second.subscriber_count, 25);
        assert_eq!(second.created_at, first.created_at);
        assert!(store.get_channel("UCmissing").unwrap().is_none());
    }

    #[test]
    fn test_longest_parsed_duration_roundtrips() {
        let (_dir, store) = open_store();
        let mut video = sample_video("long", 1);
        video.duration = crate::youtube::parse_duration("PT5124095576030432H");

        store.save_video(&video).unwrap();
        assert_eq!(store.get_video("long").unwrap().unwrap().duration, video.duration);
    }

    #[test]
    fn test_unrepresentable_duration_is_rejected() {
        let (_dir, store) = open_store();
        let mut video = sample_video("huge", 1);
        video.duration = u64::MAX;

        assert!(store.save_video(&video).is_err());
        assert!(store.get_video("huge").unwrap().is_none());
    }

    #[test]
    fn test_failed_history_append_rolls_back_video() {
        let (dir, store) = open_store();
        let conn = Connection::open(dir.path().join("shorts.db")).unwrap();
        conn.execute("DROP TABLE video_statistics", []).unwrap();
        drop(conn);

        assert!(store.save_video(&sample_video("v1", 100)).is_err());
        assert!(store.get_video("v1").unwrap().is_none());
        assert_eq!(store.count_videos().unwrap(), 0);
    }

    #[test]
    fn test_monotonic_now_clamps_to_previous() {
        let future = Utc::now() + chrono::Duration::hours(1);
        assert_eq!(monotonic_now(Some(future)), future);
        assert!(monotonic_now(None) <= Utc::now());
    }
}
