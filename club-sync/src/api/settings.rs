//! Settings screen actions

use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::Notification;

use super::ApiResult;
use crate::state::AppState;

/// POST /api/settings/brivo/test
pub async fn test_connection(State(state): State<AppState>) -> ApiResult<Notification> {
    Ok(ApiResponse::success(state.sync.test_connection().await))
}
