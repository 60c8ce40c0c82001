//! Video identifiers - pulling IDs out of YouTube URLs
//!
//! Accepted inputs:
//! - `https://www.youtube.com/watch?v=<id>` (other query parameters allowed)
//! - `https://youtu.be/<id>`
//! - `https://youtube.com/shorts/<id>`
//! - `https://youtube.com/embed/<id>` and `https://youtube.com/v/<id>`
//! - a bare 11-character ID made of `[A-Za-z0-9_-]`

use regex::Regex;
use std::sync::OnceLock;

/// Length of every YouTube video ID
pub const VIDEO_ID_LEN: usize = 11;

static URL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn url_pattern() -> &'static Regex {
    URL_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|shorts/|embed/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})",
        )
        .expect("video URL pattern is valid")
    })
}

/// Extract a video ID from a URL, or accept the input as-is if it already is one.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    if let Some(id) = url_pattern().captures(input).and_then(|caps| caps.get(1)) {
        return Some(id.as_str().to_string());
    }

    if is_video_id(input) {
        return Some(input.to_string());
    }

    None
}

/// True for exactly 11 characters of alphanumerics, `-` and `_`
pub fn is_video_id(text: &str) -> bool {
    text.len() == VIDEO_ID_LEN
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Canonical watch URL for a video
pub fn watch_url(video_id: &str) -> String {
    format!("https://youtube.com/watch?v={}", video_id)
}

/// Shorts player URL for a video
pub fn shorts_url(video_id: &str) -> String {
    format!("https://youtube.com/shorts/{}", video_id)
}
