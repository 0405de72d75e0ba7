//! Write paths that sit between the HTTP handlers and `postboard-db`.

use postboard_db::posts::{self, NewPostRow};
use postboard_db::{DbPool, PostStatus, PostsRow};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::ApiError;
use crate::validation::ValidationIssue;

const MAX_TITLE_CHARS: usize = 200;

/// Fields accepted when creating a post. Every field is optional at the
/// wire level so that missing ones are reported as validation issues.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        let title = required(&mut issues, "title", self.title.as_deref());
        required(&mut issues, "content", self.content.as_deref());
        let author = required(&mut issues, "author", self.author.as_deref());

        if let Some(title) = title {
            if title.chars().count() > MAX_TITLE_CHARS {
                issues.push(ValidationIssue::new(
                    "title",
                    "too_long",
                    format!("title must be <= {MAX_TITLE_CHARS} chars"),
                ));
            }
            if title.chars().any(char::is_control) {
                issues.push(ValidationIssue::new(
                    "title",
                    "control_chars",
                    "title contains control characters",
                ));
            }
        }
        if let Some(author) = author {
            if author.chars().any(char::is_control) {
                issues.push(ValidationIssue::new(
                    "author",
                    "control_chars",
                    "author contains control characters",
                ));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

fn required<'a>(
    issues: &mut Vec<ValidationIssue>,
    field: &str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            issues.push(ValidationIssue::blank(field));
            None
        }
    }
}

/// Validate and store a new post. New posts start as drafts with no
/// publication date.
pub async fn create_post(pool: &DbPool, input: NewPost) -> Result<PostsRow, ApiError> {
    if let Err(issues) = input.validate() {
        error!(
            errors = %crate::validation::summary(&issues),
            "failed to create post"
        );
        return Err(ApiError::Validation(issues));
    }

    let row = NewPostRow {
        title: input.title.unwrap_or_default().trim().to_owned(),
        content: input.content.unwrap_or_default(),
        author: input.author.unwrap_or_default().trim().to_owned(),
        status: PostStatus::Draft,
        published_at: None,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    let post = posts::insert_post(pool, &row).await.map_err(|e| {
        error!(error = %e, "failed to create post");
        ApiError::from(e)
    })?;
    info!(post_id = post.id, author = %post.author, "post created");
    Ok(post)
}
