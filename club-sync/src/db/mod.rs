//! Database access layer
//!
//! Hooks and jobs go through [`Store`]; `pg` is the production backend and
//! `memory` backs tests and `STORE=memory` dev runs.

pub mod memory;
pub mod pg;

use async_trait::async_trait;
use shared::models::{
    BrivoGroup, Customer, CustomerCreate, Subscription, SubscriptionState, SubscriptionTemplate,
};

use crate::error::BoxError;

pub use memory::MemoryStore;
pub use pg::PgStore;

pub type DbResult<T> = Result<T, BoxError>;

/// Group cache row to create during reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroupRow {
    pub name: String,
    pub brivo_group_id: i64,
}

/// Cache changes computed by one reconciliation run, applied atomically
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupChanges {
    /// Remote group ids whose cache rows go away
    pub delete: Vec<i64>,
    pub create: Vec<NewGroupRow>,
}

impl GroupChanges {
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.create.is_empty()
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    // ── customers ──
    async fn insert_customer(&self, new: &CustomerCreate) -> DbResult<Customer>;
    async fn get_customer(&self, id: i64) -> DbResult<Option<Customer>>;
    /// Write profile fields (name, email, barcode, active); linkage ids are untouched
    async fn save_customer(&self, customer: &Customer) -> DbResult<()>;
    async fn delete_customer(&self, id: i64) -> DbResult<()>;
    async fn set_customer_brivo_id(&self, id: i64, brivo_id: Option<i64>) -> DbResult<()>;
    async fn set_customer_credential(&self, id: i64, credential_id: Option<i64>) -> DbResult<()>;
    async fn set_customer_active(&self, id: i64, active: bool) -> DbResult<()>;

    // ── group cache ──
    async fn list_groups(&self) -> DbResult<Vec<BrivoGroup>>;
    async fn get_group(&self, id: i64) -> DbResult<Option<BrivoGroup>>;
    /// Delete and insert cache rows in one transaction.
    /// Templates linked to a deleted row lose their link.
    async fn apply_group_changes(&self, changes: &GroupChanges) -> DbResult<()>;

    // ── templates ──
    async fn insert_template(&self, name: &str, group_id: Option<i64>)
    -> DbResult<SubscriptionTemplate>;
    async fn get_template(&self, id: i64) -> DbResult<Option<SubscriptionTemplate>>;
    async fn set_template_group(&self, id: i64, group_id: Option<i64>) -> DbResult<()>;
    /// Templates linked to any of the given cache row ids
    async fn templates_for_groups(&self, group_ids: &[i64]) -> DbResult<Vec<SubscriptionTemplate>>;

    // ── subscriptions ──
    async fn insert_subscription(
        &self,
        template_id: i64,
        customer_id: i64,
        state: SubscriptionState,
    ) -> DbResult<Subscription>;
    async fn get_subscription(&self, id: i64) -> DbResult<Option<Subscription>>;
    async fn set_subscription_state(&self, id: i64, state: SubscriptionState) -> DbResult<()>;
    /// Distinct customers with a remote id holding an in-progress subscription of the template
    async fn active_members(&self, template_id: i64) -> DbResult<Vec<Customer>>;
}
