//! Tracker façade
//!
//! Maps each user intent onto store and metadata-source calls:
//! - `add`: resolve a URL/ID, fetch, save
//! - `update` / `update_all`: refetch and record a new statistics sample
//! - `list`, `stats`: read back snapshots, history and aggregates
//! - `search`: find shorts on YouTube without storing them
//! - `remove`, `channel`: delete a video, snapshot a channel
//!
//! The tracker keeps no state of its own; it returns typed outcomes and
//! leaves rendering to the caller.

use serde::Serialize;
use crate::{Error, Result};
use crate::model::{Channel, StatisticsSummary, StatsSample, Video, VideoSort};
use crate::storage::{SaveOutcome, SqliteStore};
use crate::video_id::extract_video_id;
use crate::youtube::MetadataSource;

/// Default number of history samples considered by `stats`
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Result of `add`
#[derive(Debug, Clone, Serialize)]
pub struct AddOutcome {
    pub video: Video,
    pub saved: SaveOutcome,
}

/// Result of refreshing one video
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOutcome {
    pub video: Video,
    /// View count stored before this update, 0 if the video was new
    pub previous_views: i64,
    pub view_delta: i64,
}

/// Result of refreshing every stored video
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAllOutcome {
    pub updated: Vec<UpdateOutcome>,
    /// `(video_id, reason)` for each video that could not be refreshed
    pub failed: Vec<(String, String)>,
}

/// One page of stored videos
#[derive(Debug, Clone, Serialize)]
pub struct VideoListing {
    pub videos: Vec<Video>,
    pub total: usize,
    /// Videos left out because of the limit
    pub remaining: usize,
}

/// Difference between the newest and the oldest statistics sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Growth {
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
}

impl Growth {
    pub fn between(oldest: &StatsSample, newest: &StatsSample) -> Self {
        Self {
            view_count: newest.view_count - oldest.view_count,
            like_count: newest.like_count - oldest.like_count,
            comment_count: newest.comment_count - oldest.comment_count,
        }
    }
}

/// Result of `stats`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatsReport {
    Video {
        video: Video,
        /// Oldest sample first
        history: Vec<StatsSample>,
        /// Present once at least two samples exist
        growth: Option<Growth>,
    },
    Summary(StatisticsSummary),
}

/// Orchestrates fetch → persist → report
pub struct Tracker<'a, S: MetadataSource + ?Sized> {
    store: &'a SqliteStore,
    source: &'a S,
}

impl<'a, S: MetadataSource + ?Sized> Tracker<'a, S> {
    pub fn new(store: &'a SqliteStore, source: &'a S) -> Self {
        Self { store, source }
    }

    /// Fetch a video by URL or ID and start tracking it
    pub fn add(&self, url_or_id: &str) -> Result<AddOutcome> {
        let video_id = extract_video_id(url_or_id)
            .ok_or_else(|| Error::InvalidVideoId(url_or_id.to_string()))?;

        let fetched = self.source.fetch_video(&video_id)?;
        let saved = self.store.save_video(&fetched)?;
        tracing::info!("Added video {} ({:?})", fetched.video_id, saved);

        let video = self.stored(&fetched.video_id)?;
        Ok(AddOutcome { video, saved })
    }

    /// Refetch a video and record the change in views since the last save
    pub fn update(&self, video_id: &str) -> Result<UpdateOutcome> {
        let fetched = self.source.fetch_video(video_id)?;

        let previous_views = self
            .store
            .get_video(&fetched.video_id)?
            .map(|v| v.view_count)
            .unwrap_or(0);

        self.store.save_video(&fetched)?;
        let video = self.stored(&fetched.video_id)?;
        tracing::info!("Updated video {} ({} views)", video.video_id, video.view_count);

        Ok(UpdateOutcome {
            view_delta: video.view_count - previous_views,
            previous_views,
            video,
        })
    }

    /// Refresh every stored video, one at a time, in storage order.
    ///
    /// `progress` is called before each video with `(index, total, video)`,
    /// index starting at 1. A failing video is recorded and skipped.
    pub fn update_all<F>(&self, mut progress: F) -> Result<UpdateAllOutcome>
    where
        F: FnMut(usize, usize, &Video),
    {
        let videos = self.store.get_all_videos(VideoSort::default())?;
        let total = videos.len();
        let mut outcome = UpdateAllOutcome::default();

        for (i, video) in videos.iter().enumerate() {
            progress(i + 1, total, video);

            match self.update(&video.video_id) {
                Ok(updated) => outcome.updated.push(updated),
                Err(e) => {
                    tracing::warn!("Failed to update {}: {}", video.video_id, e);
                    outcome.failed.push((video.video_id.clone(), e.to_string()));
                }
            }
        }

        Ok(outcome)
    }

    /// Stored videos in `sort` order, at most `limit` of them
    pub fn list(&self, limit: usize, sort: VideoSort) -> Result<VideoListing> {
        let mut videos = self.store.get_all_videos(sort)?;
        let total = videos.len();
        videos.truncate(limit);

        Ok(VideoListing {
            remaining: total - videos.len(),
            total,
            videos,
        })
    }

    /// History and growth for one video, or the overall summary
    pub fn stats(&self, video_id: Option<&str>, history_limit: usize) -> Result<StatsReport> {
        let Some(video_id) = video_id else {
            return Ok(StatsReport::Summary(self.store.get_statistics_summary()?));
        };

        let video = self.stored(video_id)?;

        let mut history = self.store.get_video_statistics_history(video_id, history_limit)?;
        history.reverse();

        let growth = match (history.first(), history.last()) {
            (Some(oldest), Some(newest)) if history.len() >= 2 => Some(Growth::between(oldest, newest)),
            _ => None,
        };

        Ok(StatsReport::Video { video, history, growth })
    }

    /// Search YouTube for shorts and resolve each hit to full metadata.
    ///
    /// Hits that cannot be resolved are skipped. Nothing is stored.
    pub fn search(&self, query: &str, max_results: usize) -> Result<Vec<Video>> {
        let ids = self.source.search_video_ids(query, max_results)?;
        tracing::debug!("Search '{}' returned {} ids", query, ids.len());

        let mut videos = Vec::with_capacity(ids.len());
        for id in ids {
            match self.source.fetch_video(&id) {
                Ok(video) => videos.push(video),
                Err(e) => tracing::warn!("Skipping search result {}: {}", id, e),
            }
        }

        Ok(videos)
    }

    /// Stop tracking a video. Returns whether it was stored.
    pub fn remove(&self, video_id: &str) -> Result<bool> {
        let removed = self.store.delete_video(video_id)?;
        if removed {
            tracing::info!("Removed video {}", video_id);
        }
        Ok(removed)
    }

    /// Fetch and store the current snapshot of a channel
    pub fn channel(&self, channel_id: &str) -> Result<Channel> {
        let fetched = self.source.fetch_channel(channel_id)?;
        self.store.save_channel(&fetched)?;

        self.store
            .get_channel(&fetched.channel_id)?
            .ok_or_else(|| Error::NotFound(format!("channel {}", fetched.channel_id)))
    }

    fn stored(&self, video_id: &str) -> Result<Video> {
        self.store
            .get_video(video_id)?
            .ok_or_else(|| Error::NotFound(format!("video {}", video_id)))
    }
}
