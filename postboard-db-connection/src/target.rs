//! Where a SQLite database lives, parsed from its connection URL.

use std::fmt;
use std::path::{Path, PathBuf};

/// Location of a SQLite database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqliteTarget {
    /// Private in-memory database; gone when its connection closes.
    Memory,
    /// Database file on disk.
    File(PathBuf),
}

impl SqliteTarget {
    /// Interpret a connection URL such as `sqlite://data/posts.db`,
    /// `sqlite:posts.db?mode=rwc`, `sqlite::memory:` or a bare path.
    pub fn from_url(url: &str) -> Self {
        let lower = url.to_ascii_lowercase();
        if lower.contains(":memory:") || lower.contains("mode=memory") {
            return Self::Memory;
        }

        let rest = ["sqlite://", "sqlite:"]
            .iter()
            .find_map(|scheme| url.strip_prefix(scheme))
            .unwrap_or(url);
        let rest = rest.strip_prefix("file:").unwrap_or(rest);
        let path = rest.split('?').next().unwrap_or_default().trim();

        if path.is_empty() {
            Self::Memory
        } else {
            Self::File(PathBuf::from(path))
        }
    }

    #[inline]
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Memory => None,
            Self::File(path) => Some(path),
        }
    }
}

impl fmt::Display for SqliteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
