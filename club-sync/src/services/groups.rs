//! Group reconciliation: mirror the access service's group list locally

use std::collections::{BTreeMap, BTreeSet};

use brivo_client::RemoteGroup;
use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::BrivoGroup;

use super::SyncService;
use crate::db::{GroupChanges, NewGroupRow};
use crate::error::{ServiceError, ServiceResult};

/// What one reconciliation run changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Names of newly cached groups
    pub created: Vec<String>,
    /// Remote ids whose cache rows were removed
    pub deleted: Vec<i64>,
    pub unchanged: usize,
}

/// Diff the cache against the remote list, keyed by remote group id.
///
/// Rows present on both sides are left alone, names included. A remote id
/// listed twice is cached once under its first name.
pub fn plan_group_changes(local: &[BrivoGroup], remote: &[RemoteGroup]) -> GroupChanges {
    let mut remote_by_id: BTreeMap<i64, &str> = BTreeMap::new();
    for group in remote {
        remote_by_id.entry(group.id).or_insert(&group.name);
    }
    let local_ids: BTreeSet<i64> = local.iter().map(|g| g.brivo_group_id).collect();

    GroupChanges {
        delete: local_ids
            .iter()
            .copied()
            .filter(|id| !remote_by_id.contains_key(id))
            .collect(),
        create: remote_by_id
            .iter()
            .filter(|(id, _)| !local_ids.contains(*id))
            .map(|(id, name)| NewGroupRow {
                name: name.to_string(),
                brivo_group_id: *id,
            })
            .collect(),
    }
}

impl SyncService {
    /// Bring the group cache in line with the access service.
    ///
    /// A failed listing aborts the run before anything is written.
    pub async fn reconcile_groups(&self) -> ServiceResult<ReconcileReport> {
        let remote = self
            .access
            .list_groups()
            .await
            .map_err(ServiceError::remote(ErrorCode::GroupSyncFailed))?;
        let local = self.store.list_groups().await?;
        let changes = plan_group_changes(&local, &remote);

        if changes.is_empty() {
            tracing::debug!(groups = local.len(), "Group cache already in sync");
            return Ok(ReconcileReport {
                unchanged: local.len(),
                ..Default::default()
            });
        }

        let doomed_rows: Vec<i64> = local
            .iter()
            .filter(|g| changes.delete.contains(&g.brivo_group_id))
            .map(|g| g.id)
            .collect();
        if !doomed_rows.is_empty() {
            for template in self.store.templates_for_groups(&doomed_rows).await? {
                tracing::warn!(
                    template_id = template.id,
                    template = %template.name,
                    "Access group removed remotely, template loses its group link"
                );
            }
        }

        self.store.apply_group_changes(&changes).await?;

        let report = ReconcileReport {
            created: changes.create.into_iter().map(|row| row.name).collect(),
            unchanged: local.len() - doomed_rows.len(),
            deleted: changes.delete,
        };
        tracing::info!(
            created = report.created.len(),
            deleted = report.deleted.len(),
            unchanged = report.unchanged,
            "Group cache reconciled"
        );
        Ok(report)
    }

    /// Create a group remotely, then reconcile so the cache picks it up.
    pub async fn create_group(&self, name: &str) -> ServiceResult<(RemoteGroup, ReconcileReport)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(shared::error::AppError::validation("group name must not be empty").into());
        }
        let group = self
            .access
            .create_group(name)
            .await
            .map_err(ServiceError::remote(ErrorCode::GroupSyncFailed))?;
        tracing::info!(brivo_group_id = group.id, name = %group.name, "Access group created");
        let report = self.reconcile_groups().await?;
        Ok((group, report))
    }

    pub async fn cached_groups(&self) -> ServiceResult<Vec<BrivoGroup>> {
        Ok(self.store.list_groups().await?)
    }
}
