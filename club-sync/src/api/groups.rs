//! Access group cache endpoints

use axum::Json;
use axum::extract::State;
use brivo_client::RemoteGroup;
use serde::{Deserialize, Serialize};
use shared::error::ApiResponse;
use shared::models::BrivoGroup;

use super::ApiResult;
use crate::services::ReconcileReport;
use crate::state::AppState;

/// GET /api/groups
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<BrivoGroup>> {
    Ok(ApiResponse::success(state.sync.cached_groups().await?))
}

#[derive(Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct CreateGroupResponse {
    pub group: RemoteGroup,
    pub sync: ReconcileReport,
}

/// POST /api/groups
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> ApiResult<CreateGroupResponse> {
    let (group, sync) = state.sync.create_group(&req.name).await?;
    Ok(ApiResponse::success(CreateGroupResponse { group, sync }))
}

/// POST /api/groups/sync
pub async fn sync(State(state): State<AppState>) -> ApiResult<ReconcileReport> {
    Ok(ApiResponse::success(state.sync.reconcile_groups().await?))
}
