//! Access Group Cache Model

use serde::{Deserialize, Serialize};

/// Local mirror of a group on the access service
///
/// Rows are written only by group reconciliation, keyed by `brivo_group_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BrivoGroup {
    pub id: i64,
    pub name: String,
    pub brivo_group_id: i64,
}
