//! Wire representation of a post.

use chrono::{DateTime, NaiveDateTime};
use postboard_db::PostsRow;
use serde::Serialize;

const PREVIEW_CHARS: usize = 6;
const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPayload {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: String,
    pub archived: bool,
    pub published: bool,
    pub word_count: usize,
    pub reading_time: String,
}

impl From<&PostsRow> for PostPayload {
    fn from(row: &PostsRow) -> Self {
        let word_count = row.content.split_whitespace().count();
        Self {
            id: row.id,
            title: row.title.clone(),
            content: content_preview(&row.content),
            author: row.author.clone(),
            created_at: display_date(&row.created_at),
            archived: row.is_archived(),
            published: row.is_published(),
            word_count,
            reading_time: reading_time(word_count),
        }
    }
}

/// Content longer than five characters is cut to its first six plus `...`.
pub fn content_preview(content: &str) -> String {
    if content.chars().count() >= PREVIEW_CHARS {
        let head: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_owned()
    }
}

pub fn reading_time(word_count: usize) -> String {
    format!("{} min read", word_count.div_ceil(WORDS_PER_MINUTE))
}

/// Format a stored timestamp as e.g. `October 07, 2025`. Unparseable values
/// are passed through.
pub fn display_date(stored: &str) -> String {
    const FORMAT: &str = "%B %d, %Y";
    if let Ok(dt) = DateTime::parse_from_rfc3339(stored) {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(stored, "%Y-%m-%d %H:%M:%S") {
        return dt.format(FORMAT).to_string();
    }
    stored.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(content: &str, status: &str) -> PostsRow {
        PostsRow {
            id: 7,
            title: "Title".into(),
            content: content.into(),
            author: "ada".into(),
            status: status.into(),
            published_at: None,
            created_at: "2025-10-07T17:54:57+00:00".into(),
            updated_at: "2025-10-07T17:54:57+00:00".into(),
        }
    }

    #[test]
    fn preview_truncates_after_five_chars() {
        assert_eq!(content_preview("Hello"), "Hello");
        assert_eq!(content_preview("Hello!"), "Hello!...");
        assert_eq!(content_preview("Hello world"), "Hello ...");
        assert_eq!(content_preview(""), "");
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time(0), "0 min read");
        assert_eq!(reading_time(1), "1 min read");
        assert_eq!(reading_time(200), "1 min read");
        assert_eq!(reading_time(201), "2 min read");
    }

    #[test]
    fn formats_created_at_as_long_date() {
        assert_eq!(display_date("2025-10-07T17:54:57+00:00"), "October 07, 2025");
        assert_eq!(display_date("2025-01-02 03:04:05"), "January 02, 2025");
        assert_eq!(display_date("yesterday"), "yesterday");
    }

    #[test]
    fn maps_status_flags_and_counts() {
        let payload = PostPayload::from(&row("one two  three", "published"));
        assert!(payload.published);
        assert!(!payload.archived);
        assert_eq!(payload.word_count, 3);
        assert_eq!(payload.reading_time, "1 min read");
        assert_eq!(payload.content, "one tw...");

        let archived = PostPayload::from(&row("x", "archived"));
        assert!(archived.archived);
        assert!(!archived.published);
    }
}
