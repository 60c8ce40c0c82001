//! External metadata source - the YouTube Data API
//!
//! The tracker only talks to YouTube through [`MetadataSource`], so tests can
//! swap in an in-memory source.

pub mod api;
pub mod client;
pub mod duration;

pub use client::YouTubeClient;
pub use duration::{format_duration, parse_duration};

use crate::Result;
use crate::model::{Channel, Video};

/// Remote provider of video and channel data.
///
/// Implementations return `Error::NotFound` for unknown IDs and
/// `Error::Remote` for network or provider failures.
pub trait MetadataSource {
    /// Current metadata and counts for one video
    fn fetch_video(&self, video_id: &str) -> Result<Video>;

    /// Current snapshot of one channel
    fn fetch_channel(&self, channel_id: &str) -> Result<Channel>;

    /// IDs of short videos matching `query`, most viewed first
    fn search_video_ids(&self, query: &str, max_results: usize) -> Result<Vec<String>>;
}
