//! In-memory store for tests and `STORE=memory` dev runs
//!
//! Mirrors the Postgres constraints the hooks rely on: ids are assigned
//! sequentially and deleting a group row clears template links to it.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use shared::models::{
    BrivoGroup, Customer, CustomerCreate, Subscription, SubscriptionState, SubscriptionTemplate,
};
use tokio::sync::RwLock;

use super::{DbResult, GroupChanges, Store};

#[derive(Default)]
struct Tables {
    next_id: i64,
    customers: BTreeMap<i64, Customer>,
    groups: BTreeMap<i64, BrivoGroup>,
    templates: BTreeMap<i64, SubscriptionTemplate>,
    subscriptions: BTreeMap<i64, Subscription>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_customer(&self, new: &CustomerCreate) -> DbResult<Customer> {
        let mut tables = self.tables.write().await;
        let customer = Customer {
            id: tables.next_id(),
            name: new.name.clone(),
            email: new.email.clone().filter(|e| !e.is_empty()),
            barcode: new.barcode.clone(),
            active: true,
            brivo_id: None,
            brivo_credential_id: None,
        };
        tables.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn get_customer(&self, id: i64) -> DbResult<Option<Customer>> {
        Ok(self.tables.read().await.customers.get(&id).cloned())
    }

    async fn save_customer(&self, customer: &Customer) -> DbResult<()> {
        if let Some(row) = self.tables.write().await.customers.get_mut(&customer.id) {
            row.name = customer.name.clone();
            row.email = customer.email.clone();
            row.barcode = customer.barcode.clone();
            row.active = customer.active;
        }
        Ok(())
    }

    async fn delete_customer(&self, id: i64) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        tables.customers.remove(&id);
        tables.subscriptions.retain(|_, s| s.customer_id != id);
        Ok(())
    }

    async fn set_customer_brivo_id(&self, id: i64, brivo_id: Option<i64>) -> DbResult<()> {
        if let Some(row) = self.tables.write().await.customers.get_mut(&id) {
            row.brivo_id = brivo_id;
        }
        Ok(())
    }

    async fn set_customer_credential(&self, id: i64, credential_id: Option<i64>) -> DbResult<()> {
        if let Some(row) = self.tables.write().await.customers.get_mut(&id) {
            row.brivo_credential_id = credential_id;
        }
        Ok(())
    }

    async fn set_customer_active(&self, id: i64, active: bool) -> DbResult<()> {
        if let Some(row) = self.tables.write().await.customers.get_mut(&id) {
            row.active = active;
        }
        Ok(())
    }

    async fn list_groups(&self) -> DbResult<Vec<BrivoGroup>> {
        let mut groups: Vec<BrivoGroup> =
            self.tables.read().await.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(groups)
    }

    async fn get_group(&self, id: i64) -> DbResult<Option<BrivoGroup>> {
        Ok(self.tables.read().await.groups.get(&id).cloned())
    }

    async fn apply_group_changes(&self, changes: &GroupChanges) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let doomed: BTreeSet<i64> = tables
            .groups
            .values()
            .filter(|g| changes.delete.contains(&g.brivo_group_id))
            .map(|g| g.id)
            .collect();
        tables.groups.retain(|id, _| !doomed.contains(id));
        for template in tables.templates.values_mut() {
            if template.brivo_group_id.is_some_and(|g| doomed.contains(&g)) {
                template.brivo_group_id = None;
            }
        }
        for row in &changes.create {
            let group = BrivoGroup {
                id: tables.next_id(),
                name: row.name.clone(),
                brivo_group_id: row.brivo_group_id,
            };
            tables.groups.insert(group.id, group);
        }
        Ok(())
    }

    async fn insert_template(
        &self,
        name: &str,
        group_id: Option<i64>,
    ) -> DbResult<SubscriptionTemplate> {
        let mut tables = self.tables.write().await;
        let template = SubscriptionTemplate {
            id: tables.next_id(),
            name: name.to_string(),
            brivo_group_id: group_id,
        };
        tables.templates.insert(template.id, template.clone());
        Ok(template)
    }

    async fn get_template(&self, id: i64) -> DbResult<Option<SubscriptionTemplate>> {
        Ok(self.tables.read().await.templates.get(&id).cloned())
    }

    async fn set_template_group(&self, id: i64, group_id: Option<i64>) -> DbResult<()> {
        if let Some(row) = self.tables.write().await.templates.get_mut(&id) {
            row.brivo_group_id = group_id;
        }
        Ok(())
    }

    async fn templates_for_groups(&self, group_ids: &[i64]) -> DbResult<Vec<SubscriptionTemplate>> {
        Ok(self
            .tables
            .read()
            .await
            .templates
            .values()
            .filter(|t| t.brivo_group_id.is_some_and(|g| group_ids.contains(&g)))
            .cloned()
            .collect())
    }

    async fn insert_subscription(
        &self,
        template_id: i64,
        customer_id: i64,
        state: SubscriptionState,
    ) -> DbResult<Subscription> {
        let mut tables = self.tables.write().await;
        if !tables.templates.contains_key(&template_id) {
            return Err(format!("template {template_id} does not exist").into());
        }
        if !tables.customers.contains_key(&customer_id) {
            return Err(format!("customer {customer_id} does not exist").into());
        }
        let subscription = Subscription {
            id: tables.next_id(),
            template_id,
            customer_id,
            state,
        };
        tables
            .subscriptions
            .insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn get_subscription(&self, id: i64) -> DbResult<Option<Subscription>> {
        Ok(self.tables.read().await.subscriptions.get(&id).cloned())
    }

    async fn set_subscription_state(&self, id: i64, state: SubscriptionState) -> DbResult<()> {
        if let Some(row) = self.tables.write().await.subscriptions.get_mut(&id) {
            row.state = state;
        }
        Ok(())
    }

    async fn active_members(&self, template_id: i64) -> DbResult<Vec<Customer>> {
        let tables = self.tables.read().await;
        let ids: BTreeSet<i64> = tables
            .subscriptions
            .values()
            .filter(|s| s.template_id == template_id && s.state == SubscriptionState::InProgress)
            .map(|s| s.customer_id)
            .collect();
        Ok(ids
            .into_iter()
            .filter_map(|id| tables.customers.get(&id))
            .filter(|c| c.is_linked())
            .cloned()
            .collect())
    }
}
