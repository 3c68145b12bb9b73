//! Template group reassignment wizard

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use shared::error::ApiResponse;
use shared::models::Notification;

use super::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReassignGroupRequest {
    /// Local group cache row id
    pub group_id: i64,
}

/// POST /api/templates/{id}/group
pub async fn reassign_group(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ReassignGroupRequest>,
) -> ApiResult<Notification> {
    let notification = state.sync.reassign_template_group(id, req.group_id).await?;
    Ok(ApiResponse::success(notification))
}
