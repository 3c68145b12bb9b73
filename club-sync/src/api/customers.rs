//! Customer hooks and the suspension wizard

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use shared::error::ApiResponse;
use shared::models::{Customer, CustomerCreate, CustomerUpdate, Notification};

use super::ApiResult;
use crate::services::{ArchiveOutcome, SuspensionView};
use crate::state::AppState;

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CustomerCreate>,
) -> ApiResult<Customer> {
    let customer = state.sync.create_customer(req).await?;
    Ok(ApiResponse::success(customer))
}

/// PATCH /api/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CustomerUpdate>,
) -> ApiResult<Customer> {
    let customer = state.sync.update_customer(id, req).await?;
    Ok(ApiResponse::success(customer))
}

/// POST /api/customers/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ArchiveOutcome> {
    let outcome = state.sync.archive_customer(id).await?;
    Ok(ApiResponse::success(outcome))
}

/// GET /api/customers/{id}/suspension
pub async fn suspension(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<SuspensionView> {
    let view = state.sync.suspension_status(id).await?;
    Ok(ApiResponse::success(view))
}

/// POST /api/customers/{id}/suspension/toggle
#[derive(Deserialize)]
pub struct ToggleSuspensionRequest {
    /// Flag the operator saw when opening the wizard
    pub currently_suspended: bool,
}

pub async fn toggle_suspension(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ToggleSuspensionRequest>,
) -> ApiResult<Notification> {
    let notification = state
        .sync
        .toggle_suspension(id, req.currently_suspended)
        .await?;
    Ok(ApiResponse::success(notification))
}
