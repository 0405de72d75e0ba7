use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use postboard_db::posts;
use serde_json::{json, Value};

use super::serializer::PostPayload;
use crate::handlers::utils::parse_id_param;
use crate::{error::ApiError, state::AppState};

/// GET /posts/{postId}
pub async fn get(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id_param(&path, "postId")?;
    let row = posts::find_by_id(&*state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("post {id} not found")))?;

    Ok(Json(json!({ "data": PostPayload::from(&row) })))
}
