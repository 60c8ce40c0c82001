use crate::output::{emit_success, OutputMode};
use owo_colors::OwoColorize;
use shorts_tracker::model::{Channel, StatisticsSummary, Video};
use shorts_tracker::tracker::{Growth, StatsReport, Tracker};
use shorts_tracker::ui::{self, Icons, ProgressManager, Spinner};
use shorts_tracker::video_id::{shorts_url, watch_url};
use shorts_tracker::youtube::{format_duration, MetadataSource};
use shorts_tracker::{SaveOutcome, VideoSort};
use std::time::Instant;

type App<'a> = Tracker<'a, dyn MetadataSource + 'a>;

pub fn run_add(tracker: &App<'_>, output_mode: OutputMode, url_or_id: &str) -> anyhow::Result<()> {
    let spinner = output_mode.is_human().then(|| Spinner::new("Fetching video metadata..."));
    let result = tracker.add(url_or_id);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = result?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "add", &outcome);
    }

    match outcome.saved {
        SaveOutcome::Inserted => ui::success(&format!("Now tracking: {}", outcome.video.title)),
        SaveOutcome::Updated => ui::success(&format!("Already tracked, refreshed: {}", outcome.video.title)),
    }
    print_video(&outcome.video);
    Ok(())
}

pub fn run_list(
    tracker: &App<'_>,
    output_mode: OutputMode,
    limit: usize,
    sort: VideoSort,
) -> anyhow::Result<()> {
    let listing = tracker.list(limit, sort)?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "list", &listing);
    }

    if listing.total == 0 {
        ui::warn("No videos tracked yet. Add one with `shorts add <url>`.");
        return Ok(());
    }

    ui::header(Icons::PHONE, &format!("Tracked videos ({}, sorted by {})", listing.total, sort));
    println!("{}", ui::videos_table(&listing.videos, 1));
    if listing.remaining > 0 {
        println!("{}", ui::muted(&format!("... and {} more", listing.remaining)));
    }
    Ok(())
}

pub fn run_update(tracker: &App<'_>, output_mode: OutputMode, video_id: &str) -> anyhow::Result<()> {
    let outcome = tracker.update(video_id)?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "update", &outcome);
    }

    ui::success(&format!("Updated: {}", outcome.video.title));
    ui::status(
        Icons::EYE,
        "Views",
        &format!("{} ({})", ui::count(outcome.video.view_count), ui::styled_delta(outcome.view_delta)),
    );
    ui::status(Icons::HEART, "Likes", &ui::count(outcome.video.like_count));
    ui::status(Icons::COMMENT, "Comments", &ui::count(outcome.video.comment_count));
    Ok(())
}

pub fn run_update_all(tracker: &App<'_>, output_mode: OutputMode) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut progress: Option<ProgressManager> = None;

    let outcome = tracker.update_all(|current, total, video| {
        if !output_mode.is_human() {
            return;
        }
        let bar = progress.get_or_insert_with(|| ProgressManager::new(total));
        bar.advance(current.saturating_sub(1), &video.video_id);
    })?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "update-all", &outcome);
    }

    match progress {
        Some(bar) => bar.finish_with_summary(started.elapsed(), outcome.updated.len(), outcome.failed.len()),
        None => {
            ui::warn("No videos tracked yet. Nothing to update.");
            return Ok(());
        }
    }

    for updated in &outcome.updated {
        println!(
            "  {} {} {}",
            updated.video.video_id,
            ui::styled_delta(updated.view_delta),
            ui::dim(&updated.video.title)
        );
    }
    for (video_id, reason) in &outcome.failed {
        ui::error(&format!("{}: {}", video_id, reason));
    }
    Ok(())
}

pub fn run_stats(
    tracker: &App<'_>,
    output_mode: OutputMode,
    video_id: Option<&str>,
    history_limit: usize,
) -> anyhow::Result<()> {
    let report = tracker.stats(video_id, history_limit)?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "stats", &report);
    }

    match report {
        StatsReport::Summary(summary) => print_summary(&summary),
        StatsReport::Video { video, history, growth } => {
            ui::header(Icons::STATS, &video.title);
            print_video(&video);

            ui::section(&format!(" History ({} samples) ", history.len()));
            if history.is_empty() {
                println!("{}", ui::muted(Icons::EMPTY));
            } else {
                println!("{}", ui::history_table(&history));
            }

            if let Some(growth) = growth {
                print_growth(&growth);
            }
        }
    }
    Ok(())
}

pub fn run_search(
    tracker: &App<'_>,
    output_mode: OutputMode,
    query: &str,
    max_results: usize,
) -> anyhow::Result<()> {
    let spinner = output_mode.is_human().then(|| Spinner::new(&format!("Searching for '{}'...", query)));
    let result = tracker.search(query, max_results);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let videos = result?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "search", &videos);
    }

    if videos.is_empty() {
        ui::warn(&format!("No shorts found for '{}'", query));
        return Ok(());
    }

    ui::header(Icons::SEARCH, &format!("Results for '{}'", query));
    println!("{}", ui::videos_table(&videos, 1));
    for (i, video) in videos.iter().enumerate() {
        println!("  {:>2}. {} {}", i + 1, Icons::LINK, ui::dim(&shorts_url(&video.video_id)));
    }
    Ok(())
}

pub fn run_remove(tracker: &App<'_>, output_mode: OutputMode, video_id: &str) -> anyhow::Result<()> {
    let removed = tracker.remove(video_id)?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "remove", serde_json::json!({
            "video_id": video_id,
            "removed": removed,
        }));
    }

    if removed {
        ui::success(&format!("{} Stopped tracking {}", Icons::DEL, video_id));
    } else {
        ui::warn(&format!("Video {} is not tracked", video_id));
    }
    Ok(())
}

pub fn run_channel(tracker: &App<'_>, output_mode: OutputMode, channel_id: &str) -> anyhow::Result<()> {
    let channel = tracker.channel(channel_id)?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "channel", &channel);
    }

    print_channel(&channel);
    Ok(())
}

fn print_video(video: &Video) {
    ui::status(Icons::LINK, "URL", &watch_url(&video.video_id));
    ui::status(Icons::PERSON, "Channel", &video.channel_title);
    ui::status(Icons::CLOCK, "Length", &format_duration(video.duration));
    ui::status(Icons::EYE, "Views", &ui::count(video.view_count));
    ui::status(Icons::HEART, "Likes", &ui::count(video.like_count));
    ui::status(Icons::COMMENT, "Comments", &ui::count(video.comment_count));
    let tags = video.tag_list();
    if !tags.is_empty() {
        ui::status(Icons::INFO, "Tags", &tags.join(", "));
    }
    if !video.published_at.is_empty() {
        ui::status(Icons::NEW, "Published", &video.published_at);
    }
    if let Some(updated_at) = video.updated_at {
        ui::status(Icons::HOURGLASS, "Last update", &updated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    }
}

fn print_growth(growth: &Growth) {
    ui::section(" Growth ");
    ui::summary_row("Views:   ", &ui::styled_delta(growth.view_count));
    ui::summary_row("Likes:   ", &ui::styled_delta(growth.like_count));
    ui::summary_row("Comments:", &ui::styled_delta(growth.comment_count));
}

fn print_summary(summary: &StatisticsSummary) {
    ui::header(Icons::STATS, "Tracking summary");
    let videos = ui::count(summary.total_videos);
    let views = ui::count(summary.total_views);
    let likes = ui::count(summary.total_likes);
    let average = ui::count(summary.average_views.round() as i64);
    println!(
        "{}",
        ui::stats_table(&[
            ("Videos", videos.as_str()),
            ("Total views", views.as_str()),
            ("Total likes", likes.as_str()),
            ("Average views", average.as_str()),
        ])
    );
}

fn print_channel(channel: &Channel) {
    ui::header(Icons::PERSON, &channel.channel_title.bold().to_string());
    ui::status(Icons::INFO, "ID", &channel.channel_id);
    ui::status(Icons::HEART, "Subscribers", &ui::count(channel.subscriber_count));
    ui::status(Icons::PHONE, "Videos", &ui::count(channel.video_count));
    ui::status(Icons::EYE, "Views", &ui::count(channel.view_count));
}
