//! YouTube Data API v3 response shapes
//!
//! Only the fields the tracker stores are modelled. Everything is optional on
//! the wire; missing values fall back to empty strings and zero counts.

use serde::Deserialize;
use crate::model::{Channel, Video};
use super::duration::parse_duration;

#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    pub statistics: VideoStatistics,
    pub content_details: ContentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: String,
    pub thumbnails: Thumbnails,
    pub tags: Vec<String>,
    pub category_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

impl Thumbnails {
    /// Best available thumbnail, preferring `high`
    pub fn best_url(&self) -> String {
        [&self.high, &self.medium, &self.default]
            .into_iter()
            .flatten()
            .map(|t| t.url.clone())
            .next()
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub url: String,
}

/// Counts arrive as decimal strings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentDetails {
    pub duration: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChannelSnippet {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelStatistics {
    pub subscriber_count: Option<String>,
    pub video_count: Option<String>,
    pub view_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    pub id: SearchId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchId {
    pub video_id: Option<String>,
}

/// Body of a non-2xx response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

fn count(value: &Option<String>) -> i64 {
    value.as_deref().and_then(|v| v.parse().ok()).unwrap_or(0)
}

impl VideoItem {
    /// Flatten into a `Video` record keyed by `video_id`
    pub fn into_video(self, video_id: &str) -> Video {
        let video_id = if self.id.is_empty() { video_id.to_string() } else { self.id };

        Video {
            video_id,
            thumbnail_url: self.snippet.thumbnails.best_url(),
            title: self.snippet.title,
            description: self.snippet.description,
            channel_id: self.snippet.channel_id,
            channel_title: self.snippet.channel_title,
            published_at: self.snippet.published_at,
            duration: parse_duration(&self.content_details.duration),
            view_count: count(&self.statistics.view_count),
            like_count: count(&self.statistics.like_count),
            comment_count: count(&self.statistics.comment_count),
            tags: self.snippet.tags.join(","),
            category_id: self.snippet.category_id,
            created_at: None,
            updated_at: None,
        }
    }
}

impl ChannelItem {
    pub fn into_channel(self, channel_id: &str) -> Channel {
        let channel_id = if self.id.is_empty() { channel_id.to_string() } else { self.id };

        Channel {
            channel_id,
            channel_title: self.snippet.title,
            subscriber_count: count(&self.statistics.subscriber_count),
            video_count: count(&self.statistics.video_count),
            view_count: count(&self.statistics.view_count),
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEO_JSON: &str = r#"{
        "kind": "youtube#videoListResponse",
        "items": [{
            "id": "abcDEF12345",
            "snippet": {
                "publishedAt": "2024-05-01T12:00:00Z",
                "channelId": "UC123",
                "title": "Cat does a flip",
                "description": "wow",
                "thumbnails": {
                    "default": {"url": "https://i.ytimg.com/vi/abcDEF12345/default.jpg"},
                    "high": {"url": "https://i.ytimg.com/vi/abcDEF12345/hqdefault.jpg"}
                },
                "channelTitle": "Cats Inc",
                "tags": ["cats", "shorts"],
                "categoryId": "15"
            },
            "contentDetails": {"duration": "PT0M58S"},
            "statistics": {"viewCount": "12345", "likeCount": "678", "commentCount": "9"}
        }]
    }"#;

    #[test]
    fn test_video_mapping() {
        let response: ListResponse<VideoItem> = serde_json::from_str(VIDEO_JSON).unwrap();
        let video = response.items.into_iter().next().unwrap().into_video("abcDEF12345");

        assert_eq!(video.video_id, "abcDEF12345");
        assert_eq!(video.title, "Cat does a flip");
        assert_eq!(video.channel_title, "Cats Inc");
        assert_eq!(video.duration, 58);
        assert_eq!(video.view_count, 12345);
        assert_eq!(video.like_count, 678);
        assert_eq!(video.comment_count, 9);
        assert_eq!(video.tags, "cats,shorts");
        assert_eq!(video.thumbnail_url, "https://i.ytimg.com/vi/abcDEF12345/hqdefault.jpg");
    }

    #[test]
    fn test_hidden_counts_default_to_zero() {
        let json = r#"{"items": [{"id": "x", "snippet": {"title": "t"}, "statistics": {"viewCount": "5"}}]}"#;
        let response: ListResponse<VideoItem> = serde_json::from_str(json).unwrap();
        let video = response.items.into_iter().next().unwrap().into_video("x");

        assert_eq!(video.view_count, 5);
        assert_eq!(video.like_count, 0);
        assert_eq!(video.duration, 0);
        assert_eq!(video.tags, "");
        assert_eq!(video.thumbnail_url, "");
    }

    #[test]
    fn test_empty_list() {
        let response: ListResponse<VideoItem> = serde_json::from_str(r#"{"pageInfo": {}}"#).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_channel_mapping() {
        let json = r#"{"items": [{"id": "UC123", "snippet": {"title": "Cats Inc"},
            "statistics": {"subscriberCount": "1000", "videoCount": "12", "viewCount": "99999"}}]}"#;
        let response: ListResponse<ChannelItem> = serde_json::from_str(json).unwrap();
        let channel = response.items.into_iter().next().unwrap().into_channel("UC123");

        assert_eq!(channel.channel_title, "Cats Inc");
        assert_eq!(channel.subscriber_count, 1000);
        assert_eq!(channel.video_count, 12);
        assert_eq!(channel.view_count, 99999);
    }

    #[test]
    fn test_search_ids() {
        let json = r#"{"items": [
            {"id": {"kind": "youtube#video", "videoId": "aaaaaaaaaaa"}},
            {"id": {"kind": "youtube#channel", "channelId": "UC1"}},
            {"id": {"kind": "youtube#video", "videoId": "bbbbbbbbbbb"}}
        ]}"#;
        let response: ListResponse<SearchItem> = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = response.items.into_iter().filter_map(|i| i.id.video_id).collect();
        assert_eq!(ids, vec!["aaaaaaaaaaa", "bbbbbbbbbbb"]);
    }

    #[test]
    fn test_error_body() {
        let json = r#"{"error": {"code": 403, "message": "quota exceeded", "errors": []}}"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.code, 403);
        assert_eq!(response.error.message, "quota exceeded");
    }
}
