//! Text formatting functions for `gh-triage`.
//!
//! Plain (non-ANSI) building blocks for listings:
//! - Kind badges ([issue], [pr])
//! - Record lines and descriptions
//! - Relative ages
//! - Width-aware truncation

use chrono::{DateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use triage_lib::Record;

const ELLIPSIS: char = '…';

/// Format the record kind as a bracketed badge.
#[must_use]
pub fn format_kind_badge(record: &Record) -> String {
    format!("[{}]", record.kind())
}

/// Format a single-line record summary.
///
/// Format: `{kind} #{number} {repo}  {title}`
#[must_use]
pub fn format_record_line(record: &Record) -> String {
    format!(
        "{:<5} #{} {}  {}",
        record.kind(),
        record.number,
        record.repository_name(),
        record.title
    )
}

/// Secondary line shown under a title: `#{number} - {repo}`.
#[must_use]
pub fn format_record_description(record: &Record) -> String {
    format!("#{} - {}", record.number, record.repository_name())
}

/// Compact age of a timestamp relative to `now` ("5m", "3h", "2d", "6w").
///
/// Epoch timestamps (missing upstream values) render as "-".
#[must_use]
pub fn format_age(updated: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if updated == DateTime::<Utc>::UNIX_EPOCH {
        return "-".to_string();
    }
    let elapsed = now - updated;
    let minutes = elapsed.num_minutes().max(0);
    if minutes < 60 {
        format!("{minutes}m")
    } else if minutes < 60 * 24 {
        format!("{}h", minutes / 60)
    } else if elapsed.num_days() < 14 {
        format!("{}d", elapsed.num_days())
    } else {
        format!("{}w", elapsed.num_weeks())
    }
}

/// Truncate `text` to at most `max` display columns, marking the cut with `…`.
#[must_use]
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Current terminal width in columns, if stdout is a terminal.
#[must_use]
pub fn terminal_width() -> Option<usize> {
    use std::io::IsTerminal;

    if !std::io::stdout().is_terminal() {
        return None;
    }
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| usize::from(cols))
        .filter(|cols| *cols > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_test_record(pull_request: bool) -> Record {
        let mut record = Record::new(99, 12, "Webhook retries fail");
        record.repository_url = "https://api.github.com/repos/acme/api".to_string();
        if pull_request {
            record.pull_request = Some(serde_json::json!({}));
        }
        record
    }

    #[test]
    fn test_format_record_line() {
        assert_eq!(
            format_record_line(&make_test_record(false)),
            "issue #12 api  Webhook retries fail"
        );
        assert_eq!(
            format_record_line(&make_test_record(true)),
            "pr    #12 api  Webhook retries fail"
        );
    }

    #[test]
    fn test_format_record_description() {
        assert_eq!(format_record_description(&make_test_record(false)), "#12 - api");
    }

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now - Duration::minutes(5), now), "5m");
        assert_eq!(format_age(now - Duration::hours(3), now), "3h");
        assert_eq!(format_age(now - Duration::days(2), now), "2d");
        assert_eq!(format_age(now - Duration::days(43), now), "6w");
        assert_eq!(format_age(DateTime::<Utc>::UNIX_EPOCH, now), "-");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_to_width("a longer title", 8), "a longe…");
        assert_eq!(truncate_to_width("anything", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_to_width("漢字漢字", 5), "漢字…");
    }
}
