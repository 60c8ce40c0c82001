//! ISO-8601 durations as returned in `contentDetails.duration`

use regex::Regex;
use std::sync::OnceLock;

static DURATION_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Longest duration the store can hold (SQLite INTEGER is signed 64-bit)
pub const MAX_DURATION_SECS: u64 = i64::MAX as u64;

/// Parse a `PT#H#M#S` duration into whole seconds.
///
/// Any component may be missing. Input that does not start with `PT` yields 0.
/// Absurd values are clamped to [`MAX_DURATION_SECS`].
pub fn parse_duration(text: &str) -> u64 {
    let pattern = DURATION_PATTERN.get_or_init(|| {
        Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid")
    });

    let Some(caps) = pattern.captures(text.trim()) else {
        return 0;
    };

    // Components are all digits, so a failed parse can only mean overflow
    let part = |i: usize| -> u64 {
        caps.get(i)
            .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
            .unwrap_or(0)
    };

    part(1)
        .saturating_mul(3600)
        .saturating_add(part(2).saturating_mul(60))
        .saturating_add(part(3))
        .min(MAX_DURATION_SECS)
}

/// Render seconds as `m:ss`, or `h:mm:ss` past an hour
pub fn format_duration(seconds: u64) -> String {
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("PT1M30S"), 90);
        assert_eq!(parse_duration("PT0S"), 0);
        assert_eq!(parse_duration("PT45S"), 45);
        assert_eq!(parse_duration("PT2H"), 7200);
        assert_eq!(parse_duration("PT1H2M3S"), 3723);
    }

    #[test]
    fn test_parse_duration_garbage() {
        assert_eq!(parse_duration("garbage"), 0);
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("P1D"), 0);
    }

    #[test]
    fn test_parse_duration_clamps_overflow() {
        assert_eq!(parse_duration("PT5124095576030432H"), MAX_DURATION_SECS);
        assert_eq!(parse_duration("PT99999999999999999999999S"), MAX_DURATION_SECS);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(90), "1:30");
        assert_eq!(format_duration(3723), "1:02:03");
    }
}
