//! Queries against the `posts` table.

use std::fmt;
use std::str::FromStr;

use postboard_pagination::{async_trait, CursorSource, Identified};
use serde::{Deserialize, Serialize};
use sqlx::Executor;

use crate::{DbBackend, DbPool};

const POST_COLUMNS: &str =
    "id, title, content, author, status, published_at, created_at, updated_at";

/// Lifecycle state of a post. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Processed,
    Published,
    Archived,
}

impl PostStatus {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Processed => "processed",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "processed" => Ok(Self::Processed),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown post status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostsRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub status: String,
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl PostsRow {
    /// Parsed status. Unrecognised values read as `Draft`.
    pub fn status(&self) -> PostStatus {
        self.status.parse().unwrap_or(PostStatus::Draft)
    }

    #[inline]
    pub fn is_published(&self) -> bool {
        self.status() == PostStatus::Published
    }

    #[inline]
    pub fn is_archived(&self) -> bool {
        self.status() == PostStatus::Archived
    }
}

impl Identified for PostsRow {
    #[inline]
    fn id(&self) -> i64 {
        self.id
    }
}

/// Values for a post that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPostRow {
    pub title: String,
    pub content: String,
    pub author: String,
    pub status: PostStatus,
    pub published_at: Option<String>,
    pub created_at: String,
}

pub async fn insert_post<'e, E>(executor: E, row: &NewPostRow) -> Result<PostsRow, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    let sql = format!(
        "INSERT INTO posts (title, content, author, status, published_at, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {POST_COLUMNS}"
    );
    sqlx::query_as::<_, PostsRow>(&sql)
        .bind(&row.title)
        .bind(&row.content)
        .bind(&row.author)
        .bind(row.status.as_str())
        .bind(&row.published_at)
        .bind(&row.created_at)
        .bind(&row.created_at)
        .fetch_one(executor)
        .await
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<PostsRow>, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?");
    sqlx::query_as::<_, PostsRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Up to `limit` posts with `id > after` (or from the start), ascending by id.
pub async fn list_after<'e, E>(
    executor: E,
    after: Option<i64>,
    limit: i64,
) -> Result<Vec<PostsRow>, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    match after {
        Some(cursor) => {
            let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id > ? ORDER BY id LIMIT ?");
            sqlx::query_as::<_, PostsRow>(&sql)
                .bind(cursor)
                .bind(limit)
                .fetch_all(executor)
                .await
        }
        None => {
            let sql = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY id LIMIT ?");
            sqlx::query_as::<_, PostsRow>(&sql)
                .bind(limit)
                .fetch_all(executor)
                .await
        }
    }
}

pub async fn ids_by_author<'e, E>(executor: E, author: &str) -> Result<Vec<i64>, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    let rows: Vec<(i64,)> = sqlx::query_as("SELECT id FROM posts WHERE author = ? ORDER BY id")
        .bind(author)
        .fetch_all(executor)
        .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Set a post's status. `published_at` is only written when provided.
///
/// Returns `false` when no post has the given id.
pub async fn update_status<'e, E>(
    executor: E,
    id: i64,
    status: PostStatus,
    published_at: Option<&str>,
    updated_at: &str,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    let result = sqlx::query(
        "UPDATE posts SET status = ?, published_at = COALESCE(?, published_at), updated_at = ? WHERE id = ?",
    )
    .bind(status.as_str())
    .bind(published_at)
    .bind(updated_at)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Serves cursor-paginated reads of the `posts` table.
#[derive(Debug, Clone)]
pub struct PostCursorSource {
    pool: DbPool,
}

impl PostCursorSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CursorSource for PostCursorSource {
    type Record = PostsRow;
    type Error = sqlx::Error;

    async fn fetch_after(
        &self,
        after: Option<i64>,
        limit: usize,
    ) -> Result<Vec<PostsRow>, sqlx::Error> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        list_after(&self.pool, after, limit).await
    }
}
