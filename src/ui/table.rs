use crate::model::{StatsSample, Video};
use crate::ui::output::count;
use crate::youtube::format_duration;
use tabled::{settings::{object::Columns, Alignment, Modify, Style}, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[derive(Tabled)]
struct VideoRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    video_id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Length")]
    length: String,
    #[tabled(rename = "Views")]
    views: String,
    #[tabled(rename = "Likes")]
    likes: String,
    #[tabled(rename = "Comments")]
    comments: String,
}

const TITLE_WIDTH: usize = 40;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Numbered table of videos, starting at `first_index`
pub fn videos_table(videos: &[Video], first_index: usize) -> String {
    let rows: Vec<VideoRow> = videos
        .iter()
        .enumerate()
        .map(|(i, v)| VideoRow {
            index: first_index + i,
            video_id: v.video_id.clone(),
            title: truncate(&v.title, TITLE_WIDTH),
            channel: truncate(&v.channel_title, 20),
            length: format_duration(v.duration),
            views: count(v.view_count),
            likes: count(v.like_count),
            comments: count(v.comment_count),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..)).with(Alignment::right()))
        .to_string()
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Recorded")]
    recorded_at: String,
    #[tabled(rename = "Views")]
    views: String,
    #[tabled(rename = "Likes")]
    likes: String,
    #[tabled(rename = "Comments")]
    comments: String,
}

/// Statistics samples in the order given
pub fn history_table(history: &[StatsSample]) -> String {
    let rows: Vec<HistoryRow> = history
        .iter()
        .map(|s| HistoryRow {
            recorded_at: s.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            views: count(s.view_count),
            likes: count(s.like_count),
            comments: count(s.comment_count),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title indeed", 10), "a very lo…");
    }

    #[test]
    fn test_videos_table_contains_rows() {
        let videos = vec![
            Video::new("abcDEF12345").with_title("Cat flip").with_counts(12345, 10, 1),
        ];
        let table = videos_table(&videos, 1);
        assert!(table.contains("abcDEF12345"));
        assert!(table.contains("12,345"));
    }

    #[test]
    fn test_empty_builder() {
        assert_eq!(TableBuilder::new().build(), "");
        assert!(stats_table(&[("Videos", "3")]).contains("Videos"));
    }
}
