//! Sync hooks, reconciliation and wizard actions
//!
//! Each submodule adds an `impl SyncService` block for one area. Hooks
//! take the store and the access service through trait objects so the
//! same code runs against Postgres + Brivo or the in-memory fakes.

mod customers;
mod groups;
mod memberships;
mod settings;
mod wizards;

use std::sync::Arc;

use brivo_client::AccessService;
use shared::error::AppError;
use shared::models::{Customer, SubscriptionTemplate};

use crate::db::Store;
use crate::error::ServiceResult;

pub use customers::ArchiveOutcome;
pub use groups::{ReconcileReport, plan_group_changes};
pub use memberships::MembershipOutcome;
pub use wizards::SuspensionView;

#[derive(Clone)]
pub struct SyncService {
    store: Arc<dyn Store>,
    access: Arc<dyn AccessService>,
}

impl SyncService {
    pub fn new(store: Arc<dyn Store>, access: Arc<dyn AccessService>) -> Self {
        Self { store, access }
    }

    async fn customer(&self, id: i64) -> ServiceResult<Customer> {
        self.store
            .get_customer(id)
            .await?
            .ok_or_else(|| AppError::customer_not_found(id).into())
    }

    async fn template(&self, id: i64) -> ServiceResult<SubscriptionTemplate> {
        self.store
            .get_template(id)
            .await?
            .ok_or_else(|| AppError::template_not_found(id).into())
    }

    /// Remote group id behind a template's cached group link, if any
    async fn template_remote_group(
        &self,
        template: &SubscriptionTemplate,
    ) -> ServiceResult<Option<i64>> {
        let Some(group_id) = template.brivo_group_id else {
            return Ok(None);
        };
        Ok(self
            .store
            .get_group(group_id)
            .await?
            .map(|g| g.brivo_group_id))
    }
}
