//! Utility helpers — path resolution, title truncation, date formatting.

use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};

/// Get the Echochat data directory (e.g. `~/.echochat/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".echochat")
}

/// Get the default key-value storage directory (e.g. `~/.echochat/storage/`).
pub fn get_storage_path() -> PathBuf {
    get_data_path().join("storage")
}

/// Take the first `max_chars` characters and always append `"..."`,
/// even when nothing was cut. Unicode-safe.
pub fn clip_with_ellipsis(s: &str, max_chars: usize) -> String {
    let head: String = s.chars().take(max_chars).collect();
    format!("{}...", head)
}

/// Short local date for history listings, e.g. `Oct 19, 02:30 PM`.
pub fn format_short_date(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %-d, %I:%M %p").to_string()
}

/// Sanitize a string for use as a filename.
pub fn safe_filename(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_short_string_still_gets_ellipsis() {
        assert_eq!(clip_with_ellipsis("hi", 30), "hi...");
        assert_eq!(clip_with_ellipsis("", 30), "...");
    }

    #[test]
    fn test_clip_long_string() {
        let text = "a".repeat(45);
        let clipped = clip_with_ellipsis(&text, 30);
        assert_eq!(clipped, format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn test_clip_unicode() {
        assert_eq!(clip_with_ellipsis("こんにちは世界", 5), "こんにちは...");
    }

    #[test]
    fn test_format_short_date() {
        let ts: DateTime<Utc> = "2024-10-19T14:30:00Z".parse().unwrap();
        let formatted = format_short_date(&ts);
        // Month is stable across local time zones.
        assert!(formatted.starts_with("Oct "));
        assert!(formatted.contains(", "));
        assert!(formatted.ends_with("AM") || formatted.ends_with("PM"));
    }

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("chatSessions"), "chatSessions");
        assert_eq!(safe_filename("a/b c"), "a_b_c");
    }

    #[test]
    fn test_storage_path() {
        let path = get_storage_path();
        assert!(path.ends_with("storage"));
        assert!(path.parent().unwrap().ends_with(".echochat"));
    }
}
