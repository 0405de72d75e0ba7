//! The paginate operation and its result types.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PaginationConfig;
use crate::cursor::{Cursor, PageRequest};
use crate::source::{CursorSource, Identified};

/// Pagination metadata returned alongside a page of records.
///
/// `next_cursor` and `current_cursor` are omitted from the serialized form
/// when absent; an absent `next_cursor` means there is no more data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<i64>,
    pub has_next: bool,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_cursor: Option<i64>,
}

impl PaginationInfo {
    /// The cursor a caller should send to fetch the following page.
    #[inline]
    pub fn next(&self) -> Option<Cursor> {
        self.next_cursor.and_then(Cursor::new)
    }
}

/// One page of records plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<R> {
    pub records: Vec<R>,
    pub pagination: PaginationInfo,
}

impl<R> Page<R> {
    /// Convert every record while keeping the pagination metadata.
    pub fn map<T, F>(self, f: F) -> Page<T>
    where
        F: FnMut(R) -> T,
    {
        Page {
            records: self.records.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetch one page from `source`.
///
/// Issues exactly one read of `effective_limit + 1` records. When the
/// lookahead record comes back it is dropped and `has_next` is set, with
/// `next_cursor` pointing at the last record that was kept. Errors from the
/// source are returned as-is; nothing is retried.
pub async fn paginate<S>(
    source: &S,
    request: &PageRequest,
    config: &PaginationConfig,
) -> Result<Page<S::Record>, S::Error>
where
    S: CursorSource + ?Sized,
{
    let limit = config.effective_limit(request.limit);
    let page_size = limit as usize;
    let after = request.cursor.map(Cursor::get);

    let mut records = source.fetch_after(after, page_size + 1).await?;

    let has_next = records.len() > page_size;
    if has_next {
        records.truncate(page_size);
    }

    let next_cursor = if has_next {
        records.last().map(Identified::id)
    } else {
        None
    };

    debug!(
        cursor = ?after,
        limit,
        returned = records.len(),
        has_next,
        "paginated records"
    );

    Ok(Page {
        records,
        pagination: PaginationInfo {
            next_cursor,
            has_next,
            limit,
            current_cursor: after,
        },
    })
}
