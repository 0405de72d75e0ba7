pub type DbBackend = sqlx::Sqlite;

pub mod posts;

pub use postboard_db_connection::{create_pool, DbConnectionConfig, DbConnectionError, DbPool};
pub use posts::{NewPostRow, PostCursorSource, PostStatus, PostsRow};
