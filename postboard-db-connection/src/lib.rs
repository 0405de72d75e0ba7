//! SQLite connection pool construction for postboard.
//!
//! [`DbConnectionConfig`] describes where the database lives and how large
//! the pool may grow; [`create_pool`] turns it into a ready [`DbPool`],
//! creating the database file and its directory on first use.

pub mod config;
pub mod error;
pub mod pool;
pub mod target;

pub use config::DbConnectionConfig;
pub use error::DbConnectionError;
pub use pool::{create_pool, DbPool};
pub use target::SqliteTarget;
