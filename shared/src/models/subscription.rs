//! Subscription Template and Subscription Models

use serde::{Deserialize, Serialize};

/// Membership template; defines which access group its subscriptions join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SubscriptionTemplate {
    pub id: i64,
    pub name: String,
    /// Local group cache row id (not the remote group id)
    pub brivo_group_id: Option<i64>,
}

/// Subscription lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    #[default]
    Draft,
    InProgress,
    Closed,
}

impl SubscriptionState {
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "in_progress" => Some(Self::InProgress),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Subscription (sale order) of a customer under a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub template_id: i64,
    pub customer_id: i64,
    pub state: SubscriptionState,
}
