//! Membership hooks

use axum::extract::{Path, State};
use shared::error::ApiResponse;

use super::ApiResult;
use crate::services::MembershipOutcome;
use crate::state::AppState;

/// POST /api/subscriptions/{id}/confirm
pub async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<MembershipOutcome> {
    Ok(ApiResponse::success(state.sync.confirm_subscription(id).await?))
}

/// POST /api/subscriptions/{id}/close
pub async fn close(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<MembershipOutcome> {
    Ok(ApiResponse::success(state.sync.close_subscription(id).await?))
}
