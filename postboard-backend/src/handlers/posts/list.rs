use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Json, Query};
use postboard_pagination::{paginate, PageRequest, PaginationInfo};
use serde::Serialize;

use super::serializer::PostPayload;
use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct PostCollection {
    pub collection: Vec<PostPayload>,
    pub pagination: PaginationInfo,
}

/// GET /posts?cursor=&limit=
/// List posts in ascending id order, one page at a time.
pub async fn list(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PostCollection>, ApiError> {
    let request = PageRequest::from_query(&params);
    let page = paginate(&state.post_source(), &request, &state.pagination)
        .await?
        .map(|row| PostPayload::from(&row));

    Ok(Json(PostCollection {
        collection: page.records,
        pagination: page.pagination,
    }))
}
