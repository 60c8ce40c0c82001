//! Record types - videos, statistics samples and channels
//!
//! The store owns three record kinds:
//! - `Video`: current snapshot of a short's metadata and counts
//! - `StatsSample`: one immutable point of a video's engagement time series
//! - `Channel`: current snapshot of a channel's aggregate counts

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A tracked short-form video.
///
/// Missing text fields default to the empty string and counts to zero, so a
/// partially populated record can still be saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Externally assigned YouTube video ID
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    /// Publish time as delivered by the API (ISO-8601)
    pub published_at: String,
    /// Length in whole seconds
    pub duration: u64,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub thumbnail_url: String,
    /// Comma-joined tag list
    pub tags: String,
    pub category_id: String,
    /// Set once, on first insert
    pub created_at: Option<DateTime<Utc>>,
    /// Set on every save
    pub updated_at: Option<DateTime<Utc>>,
}

impl Video {
    /// Create an empty record for the given ID
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            ..Self::default()
        }
    }

    /// Set the current engagement counts
    pub fn with_counts(mut self, views: i64, likes: i64, comments: i64) -> Self {
        self.view_count = views;
        self.like_count = likes;
        self.comment_count = comments;
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Tags split back out of the stored comma-joined form
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// One statistics-history entry. Never updated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSample {
    pub id: i64,
    pub video_id: String,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub recorded_at: DateTime<Utc>,
}

/// A channel snapshot. Channels keep no history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: String,
    pub channel_title: String,
    pub subscriber_count: i64,
    pub video_count: i64,
    pub view_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Channel {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }
}

/// Aggregates over every stored video
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_videos: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub average_views: f64,
}

impl StatisticsSummary {
    /// Build a summary, guarding the mean against an empty store
    pub fn from_totals(total_videos: i64, total_views: i64, total_likes: i64) -> Self {
        let average_views = if total_videos > 0 {
            total_views as f64 / total_videos as f64
        } else {
            0.0
        };

        Self {
            total_videos,
            total_views,
            total_likes,
            average_views,
        }
    }
}

/// Columns a video listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Updated,
    Created,
    Published,
    Views,
    Likes,
    Comments,
    Title,
}

impl SortField {
    /// Column name in the `videos` table
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Updated => "updated_at",
            SortField::Created => "created_at",
            SortField::Published => "published_at",
            SortField::Views => "view_count",
            SortField::Likes => "like_count",
            SortField::Comments => "comment_count",
            SortField::Title => "title",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Updated => "updated",
            SortField::Created => "created",
            SortField::Published => "published",
            SortField::Views => "views",
            SortField::Likes => "likes",
            SortField::Comments => "comments",
            SortField::Title => "title",
        }
    }

    pub fn all() -> &'static [SortField] {
        &[
            SortField::Updated,
            SortField::Created,
            SortField::Published,
            SortField::Views,
            SortField::Likes,
            SortField::Comments,
            SortField::Title,
        ]
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "updated" | "updated_at" => Ok(SortField::Updated),
            "created" | "created_at" | "added" => Ok(SortField::Created),
            "published" | "published_at" => Ok(SortField::Published),
            "views" | "view_count" => Ok(SortField::Views),
            "likes" | "like_count" => Ok(SortField::Likes),
            "comments" | "comment_count" => Ok(SortField::Comments),
            "title" => Ok(SortField::Title),
            _ => {
                let known: Vec<&str> = SortField::all().iter().map(SortField::as_str).collect();
                Err(Error::InvalidSort(format!("unknown field '{}', expected one of: {}", s, known.join(", "))))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(Error::InvalidSort(format!("unknown direction '{}'", s))),
        }
    }
}

/// Ordering for `get_all_videos`.
///
/// Only known `{field, direction}` pairs can be expressed, so the ORDER BY
/// clause is always built from static fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl VideoSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// ORDER BY clause body, e.g. `updated_at DESC`
    pub fn order_clause(&self) -> String {
        format!("{} {}", self.field.column(), self.direction.keyword())
    }
}

impl Default for VideoSort {
    fn default() -> Self {
        Self::new(SortField::Updated, SortDirection::Desc)
    }
}

/// Parses `field` or `field:direction`, e.g. `views:desc`.
/// A bare field sorts descending.
impl FromStr for VideoSort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field.trim(), direction.trim().parse()?),
            None => (s.trim(), SortDirection::Desc),
        };
        Ok(Self::new(field.parse()?, direction))
    }
}

impl std::fmt::Display for VideoSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.field.as_str(), direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_roundtrip() {
        for field in SortField::all() {
            let parsed: SortField = field.as_str().parse().unwrap();
            assert_eq!(*field, parsed);
        }
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(VideoSort::from_str("views").unwrap(), VideoSort::new(SortField::Views, SortDirection::Desc));
        assert_eq!(VideoSort::from_str("title:asc").unwrap(), VideoSort::new(SortField::Title, SortDirection::Asc));
        assert_eq!(VideoSort::from_str("view_count:DESC").unwrap().order_clause(), "view_count DESC");
        assert_eq!(VideoSort::default().order_clause(), "updated_at DESC");
    }

    #[test]
    fn test_sort_rejects_free_form_sql() {
        assert!(VideoSort::from_str("updated_at; DROP TABLE videos").is_err());
        assert!(VideoSort::from_str("views:sideways").is_err());
        assert!(VideoSort::from_str("1=1").is_err());
    }

    #[test]
    fn test_summary_on_empty_store() {
        let summary = StatisticsSummary::from_totals(0, 0, 0);
        assert_eq!(summary.total_videos, 0);
        assert_eq!(summary.average_views, 0.0);
    }

    #[test]
    fn test_summary_average() {
        let summary = StatisticsSummary::from_totals(4, 1000, 40);
        assert_eq!(summary.average_views, 250.0);
    }

    #[test]
    fn test_tag_list() {
        let mut video = Video::new("abcDEF12345");
        video.tags = "shorts,funny, cats,".to_string();
        assert_eq!(video.tag_list(), vec!["shorts", "funny", "cats"]);
        assert!(Video::new("x").tag_list().is_empty());
    }
}
