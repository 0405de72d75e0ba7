use std::sync::Arc;

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use serde_json::{json, Map, Value};

use super::serializer::PostPayload;
use crate::services::{create_post, NewPost};
use crate::validation::ValidationIssue;
use crate::{error::ApiError, state::AppState};

/// POST /posts
/// Body: `{ "data": { "title", "content", "author" } }`.
pub async fn create(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let data = match body.get("data") {
        Some(Value::Object(data)) => data,
        _ => {
            return Err(ApiError::Validation(vec![ValidationIssue::new(
                "data",
                "missing",
                "param is missing or the value is empty: data",
            )]))
        }
    };
    let input = new_post_from(data).map_err(ApiError::Validation)?;

    let row = create_post(&state.db_pool, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": PostPayload::from(&row) })),
    ))
}

/// Read the post fields out of `data`. A field that is present but not a
/// string is reported against that field.
fn new_post_from(data: &Map<String, Value>) -> Result<NewPost, Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let mut text = |field: &str| match data.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            issues.push(ValidationIssue::new(
                field,
                "invalid_type",
                format!("{field} must be a string"),
            ));
            None
        }
    };

    let post = NewPost {
        title: text("title"),
        content: text("content"),
        author: text("author"),
    };
    if issues.is_empty() {
        Ok(post)
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_string_fields_are_reported_per_field() {
        let data = json!({ "title": 5, "content": ["x"], "author": "ada" });
        let issues = new_post_from(data.as_object().unwrap()).unwrap_err();

        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, ["title", "content"]);
        assert!(issues.iter().all(|i| i.code == "invalid_type"));
    }

    #[test]
    fn null_fields_are_treated_as_missing() {
        let data = json!({ "title": null, "content": "body", "author": "ada" });
        let post = new_post_from(data.as_object().unwrap()).unwrap();
        assert_eq!(post.title, None);
        assert_eq!(post.content.as_deref(), Some("body"));
    }
}
