//! HTTP surface the club application calls into

pub mod customers;
pub mod groups;
pub mod health;
pub mod settings;
pub mod subscriptions;
pub mod templates;

use axum::Router;
use axum::routing::{get, patch, post};
use shared::error::{ApiResponse, AppError};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let customers = Router::new()
        .route("/api/customers", post(customers::create))
        .route("/api/customers/{id}", patch(customers::update))
        .route("/api/customers/{id}/archive", post(customers::archive))
        .route("/api/customers/{id}/suspension", get(customers::suspension))
        .route(
            "/api/customers/{id}/suspension/toggle",
            post(customers::toggle_suspension),
        );

    let memberships = Router::new()
        .route("/api/subscriptions/{id}/confirm", post(subscriptions::confirm))
        .route("/api/subscriptions/{id}/close", post(subscriptions::close))
        .route("/api/templates/{id}/group", post(templates::reassign_group));

    let groups = Router::new()
        .route("/api/groups", get(groups::list).post(groups::create))
        .route("/api/groups/sync", post(groups::sync));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/settings/brivo/test", post(settings::test_connection))
        .merge(customers)
        .merge(memberships)
        .merge(groups)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
