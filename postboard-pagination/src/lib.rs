//! Cursor-based pagination over sources ordered by a strictly increasing
//! integer id.
//!
//! A page is produced by a single bounded read against a [`CursorSource`]:
//! the paginator asks for one record more than the effective limit and uses
//! the presence of that lookahead record to decide whether a further page
//! exists, so no separate count query is ever issued.
//!
//! # Architecture
//!
//! - [`paginate`] - Produces a [`Page`] from a source, a request and a config
//! - [`CursorSource`] - Trait implemented by anything that can serve `id > cursor` reads
//! - [`PageRequest`] - Cursor and limit as supplied by the caller
//! - [`PaginationConfig`] - Default page size and the hard ceiling
//!
//! # Example
//!
//! ```rust
//! use postboard_pagination::{paginate, PageRequest, PaginationConfig};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let ids: Vec<i64> = vec![1, 2, 3];
//! let config = PaginationConfig::default();
//!
//! let first = paginate(&ids, &PageRequest::default(), &config).await.unwrap();
//! assert_eq!(first.records, vec![1, 2]);
//! assert_eq!(first.pagination.next_cursor, Some(2));
//!
//! let request = PageRequest::from_raw(Some("2"), None);
//! let second = paginate(&ids, &request, &config).await.unwrap();
//! assert_eq!(second.records, vec![3]);
//! assert!(!second.pagination.has_next);
//! # }
//! ```
//!
//! # Preconditions
//!
//! Record ids must be unique and strictly increasing in source order.
//! Duplicate or decreasing ids are not detected. Appending records with
//! higher ids between calls never disturbs an existing cursor; deleting
//! records that were already returned, or inserting records with an id below
//! a cursor a caller still holds, may cause those records to be skipped.

mod config;
mod cursor;
mod paginator;
mod source;

pub use config::{PaginationConfig, DEFAULT_LIMIT, MAX_LIMIT};
pub use cursor::{Cursor, PageRequest};
pub use paginator::{paginate, Page, PaginationInfo};
pub use source::{CursorSource, Identified};

pub use async_trait::async_trait;
