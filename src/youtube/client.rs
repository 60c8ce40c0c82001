//! Blocking YouTube Data API v3 client

use std::time::Duration;
use serde::de::DeserializeOwned;
use crate::{Error, Result};
use crate::config::Settings;
use crate::model::{Channel, Video};
use super::MetadataSource;
use super::api::{ChannelItem, ErrorResponse, ListResponse, SearchItem, VideoItem};

pub const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The API caps `maxResults` for search at 50
const MAX_SEARCH_RESULTS: usize = 50;

pub struct YouTubeClient {
    agent: ureq::Agent,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config("YouTube API key is empty".to_string()));
        }

        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Ok(Self {
            agent,
            api_key,
            base_url: API_BASE.to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.api_key.clone(), settings.timeout)
    }

    /// Point the client at another endpoint (a proxy or a local mock)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// GET `<base>/<resource>` with the API key appended and decode the JSON body.
    fn get<T: DeserializeOwned>(&self, resource: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, resource);
        tracing::debug!("GET {} {:?}", url, query);

        let mut request = self.agent.get(&url);
        for (key, value) in query {
            request = request.query(key, value);
        }

        let response = match request.query("key", &self.api_key).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => {
                return Err(Error::NotFound(format!("{} {:?}", resource, query)));
            }
            Err(ureq::Error::Status(code, response)) => {
                let message = response
                    .into_json::<ErrorResponse>()
                    .map(|body| body.error.message)
                    .unwrap_or_default();
                return Err(Error::Remote(format!("{} returned HTTP {}: {}", resource, code, message)));
            }
            // Transport errors carry the full URL, which includes the key
            Err(ureq::Error::Transport(transport)) => {
                let detail = transport.message().unwrap_or_default();
                return Err(Error::Remote(format!("{} request failed ({}) {}", resource, transport.kind(), detail)));
            }
        };

        response
            .into_json::<T>()
            .map_err(|e| Error::Remote(format!("malformed {} response: {}", resource, e)))
    }
}

impl MetadataSource for YouTubeClient {
    fn fetch_video(&self, video_id: &str) -> Result<Video> {
        let response: ListResponse<VideoItem> = self.get(
            "videos",
            &[("part", "snippet,statistics,contentDetails"), ("id", video_id)],
        )?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| item.into_video(video_id))
            .ok_or_else(|| Error::NotFound(format!("video {}", video_id)))
    }

    fn fetch_channel(&self, channel_id: &str) -> Result<Channel> {
        let response: ListResponse<ChannelItem> =
            self.get("channels", &[("part", "snippet,statistics"), ("id", channel_id)])?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| item.into_channel(channel_id))
            .ok_or_else(|| Error::NotFound(format!("channel {}", channel_id)))
    }

    fn search_video_ids(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let max_results = max_results.min(MAX_SEARCH_RESULTS).to_string();
        let response: ListResponse<SearchItem> = self.get(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("videoDuration", "short"),
                ("order", "viewCount"),
                ("maxResults", &max_results),
            ],
        )?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }
}
