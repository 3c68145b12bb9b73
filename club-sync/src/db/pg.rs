//! PostgreSQL store

use async_trait::async_trait;
use shared::models::{
    BrivoGroup, Customer, CustomerCreate, Subscription, SubscriptionState, SubscriptionTemplate,
};
use sqlx::PgPool;

use super::{DbResult, GroupChanges, Store};

const CUSTOMER_COLUMNS: &str = "id, name, email, barcode, active, brivo_id, brivo_credential_id";

#[derive(sqlx::FromRow)]
struct SubscriptionRow {
    id: i64,
    template_id: i64,
    customer_id: i64,
    state: String,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = String;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let state = SubscriptionState::from_db(&row.state)
            .ok_or_else(|| format!("subscription {} has unknown state {}", row.id, row.state))?;
        Ok(Subscription {
            id: row.id,
            template_id: row.template_id,
            customer_id: row.customer_id,
            state,
        })
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run pending migrations
    pub async fn connect(database_url: &str) -> DbResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_customer(&self, new: &CustomerCreate) -> DbResult<Customer> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO customers (name, email, barcode) VALUES ($1, $2, $3)
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.email.as_deref().filter(|e| !e.is_empty()))
        .bind(&new.barcode)
        .fetch_one(&self.pool)
        .await?;
        Ok(customer)
    }

    async fn get_customer(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    async fn save_customer(&self, customer: &Customer) -> DbResult<()> {
        sqlx::query(
            "UPDATE customers SET name = $1, email = $2, barcode = $3, active = $4 WHERE id = $5",
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.barcode)
        .bind(customer.active)
        .bind(customer.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_customer(&self, id: i64) -> DbResult<()> {
        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_customer_brivo_id(&self, id: i64, brivo_id: Option<i64>) -> DbResult<()> {
        sqlx::query("UPDATE customers SET brivo_id = $1 WHERE id = $2")
            .bind(brivo_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_customer_credential(&self, id: i64, credential_id: Option<i64>) -> DbResult<()> {
        sqlx::query("UPDATE customers SET brivo_credential_id = $1 WHERE id = $2")
            .bind(credential_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_customer_active(&self, id: i64, active: bool) -> DbResult<()> {
        sqlx::query("UPDATE customers SET active = $1 WHERE id = $2")
            .bind(active)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_groups(&self) -> DbResult<Vec<BrivoGroup>> {
        let groups = sqlx::query_as::<_, BrivoGroup>(
            "SELECT id, name, brivo_group_id FROM brivo_groups ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(groups)
    }

    async fn get_group(&self, id: i64) -> DbResult<Option<BrivoGroup>> {
        let group = sqlx::query_as::<_, BrivoGroup>(
            "SELECT id, name, brivo_group_id FROM brivo_groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(group)
    }

    async fn apply_group_changes(&self, changes: &GroupChanges) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        if !changes.delete.is_empty() {
            sqlx::query("DELETE FROM brivo_groups WHERE brivo_group_id = ANY($1)")
                .bind(&changes.delete)
                .execute(&mut *tx)
                .await?;
        }
        for row in &changes.create {
            sqlx::query("INSERT INTO brivo_groups (name, brivo_group_id) VALUES ($1, $2)")
                .bind(&row.name)
                .bind(row.brivo_group_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn insert_template(
        &self,
        name: &str,
        group_id: Option<i64>,
    ) -> DbResult<SubscriptionTemplate> {
        let template = sqlx::query_as::<_, SubscriptionTemplate>(
            "INSERT INTO subscription_templates (name, brivo_group_id) VALUES ($1, $2)
             RETURNING id, name, brivo_group_id",
        )
        .bind(name)
        .bind(group_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(template)
    }

    async fn get_template(&self, id: i64) -> DbResult<Option<SubscriptionTemplate>> {
        let template = sqlx::query_as::<_, SubscriptionTemplate>(
            "SELECT id, name, brivo_group_id FROM subscription_templates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(template)
    }

    async fn set_template_group(&self, id: i64, group_id: Option<i64>) -> DbResult<()> {
        sqlx::query("UPDATE subscription_templates SET brivo_group_id = $1 WHERE id = $2")
            .bind(group_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn templates_for_groups(&self, group_ids: &[i64]) -> DbResult<Vec<SubscriptionTemplate>> {
        let templates = sqlx::query_as::<_, SubscriptionTemplate>(
            "SELECT id, name, brivo_group_id FROM subscription_templates
             WHERE brivo_group_id = ANY($1) ORDER BY id",
        )
        .bind(group_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(templates)
    }

    async fn insert_subscription(
        &self,
        template_id: i64,
        customer_id: i64,
        state: SubscriptionState,
    ) -> DbResult<Subscription> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            "INSERT INTO subscriptions (template_id, customer_id, state) VALUES ($1, $2, $3)
             RETURNING id, template_id, customer_id, state",
        )
        .bind(template_id)
        .bind(customer_id)
        .bind(state.as_db())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_into()?)
    }

    async fn get_subscription(&self, id: i64) -> DbResult<Option<Subscription>> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            "SELECT id, template_id, customer_id, state FROM subscriptions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    async fn set_subscription_state(&self, id: i64, state: SubscriptionState) -> DbResult<()> {
        sqlx::query("UPDATE subscriptions SET state = $1 WHERE id = $2")
            .bind(state.as_db())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn active_members(&self, template_id: i64) -> DbResult<Vec<Customer>> {
        let members = sqlx::query_as::<_, Customer>(
            "SELECT DISTINCT c.id, c.name, c.email, c.barcode, c.active, c.brivo_id, c.brivo_credential_id
             FROM customers c
             JOIN subscriptions s ON s.customer_id = c.id
             WHERE s.template_id = $1 AND s.state = $2 AND c.brivo_id IS NOT NULL
             ORDER BY c.id",
        )
        .bind(template_id)
        .bind(SubscriptionState::InProgress.as_db())
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }
}
