//! Cursor and request parsing.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Id of the last record a caller has seen.
///
/// Cursors are always non-negative. They carry no meaning for callers beyond
/// being handed back as `cursor` on the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(i64);

impl Cursor {
    /// Build a cursor from a record id. Negative ids yield `None`.
    #[inline]
    pub const fn new(id: i64) -> Option<Self> {
        if id < 0 {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Parse a cursor from its wire form.
    ///
    /// Anything that is not a non-negative integer is treated as no cursor
    /// at all, which restarts pagination from the beginning.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().and_then(Self::new)
    }

    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cursor and limit as requested by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub cursor: Option<Cursor>,
    /// Requested page size before the policy in
    /// [`PaginationConfig`](crate::PaginationConfig) is applied.
    pub limit: Option<i64>,
}

impl PageRequest {
    /// Build a request from raw string parameters, coercing invalid values
    /// to "absent".
    pub fn from_raw(cursor: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            cursor: cursor.and_then(Cursor::parse),
            limit: limit.and_then(|raw| raw.trim().parse::<i64>().ok()),
        }
    }

    /// Build a request from decoded query-string parameters (`cursor`, `limit`).
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self::from_raw(
            params.get("cursor").map(String::as_str),
            params.get("limit").map(String::as_str),
        )
    }

    #[inline]
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    #[inline]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
