//! Interactive wizard actions: template group reassignment and suspension toggle

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::Notification;

use super::SyncService;
use crate::error::{ServiceError, ServiceResult};

/// Current remote suspension flag of a linked customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspensionView {
    pub customer_id: i64,
    pub brivo_id: i64,
    pub suspended: bool,
}

impl SyncService {
    /// Move every active member of a template from its current group to `group_id`.
    ///
    /// Members are processed one at a time, leaving the old group before
    /// joining the new one. The first failure stops the run and the template
    /// keeps its old link.
    pub async fn reassign_template_group(
        &self,
        template_id: i64,
        group_id: i64,
    ) -> ServiceResult<Notification> {
        let template = self.template(template_id).await?;
        let target = self
            .store
            .get_group(group_id)
            .await?
            .ok_or_else(|| AppError::group_not_found(group_id))?;
        let previous = self.template_remote_group(&template).await?;
        let members = self.store.active_members(template_id).await?;

        tracing::info!(
            template_id,
            from = ?previous,
            to = target.brivo_group_id,
            members = members.len(),
            "Reassigning template group"
        );

        for member in &members {
            let Some(user_id) = member.brivo_id else {
                continue;
            };
            if let Some(old) = previous {
                self.access
                    .remove_from_group(old, user_id)
                    .await
                    .map_err(ServiceError::remote(ErrorCode::GroupReassignFailed))?;
            }
            self.access
                .add_to_group(target.brivo_group_id, user_id)
                .await
                .map_err(ServiceError::remote(ErrorCode::GroupReassignFailed))?;
        }

        self.store
            .set_template_group(template_id, Some(target.id))
            .await?;
        Ok(Notification::success(
            "Brivo Group Reassignment Successful",
            format!("Moved {} member(s) to {}.", members.len(), target.name),
        ))
    }

    pub async fn suspension_status(&self, customer_id: i64) -> ServiceResult<SuspensionView> {
        let customer = self.customer(customer_id).await?;
        let brivo_id = customer
            .brivo_id
            .ok_or_else(|| AppError::customer_not_linked(customer_id))?;
        let suspended = self
            .access
            .suspended_status(brivo_id)
            .await
            .map_err(ServiceError::remote(ErrorCode::AccessRequestFailed))?;
        Ok(SuspensionView {
            customer_id,
            brivo_id,
            suspended,
        })
    }

    /// Flip the suspension flag the operator is looking at.
    ///
    /// A failed remote call is reported as a danger notification rather than
    /// an error; only a missing or unlinked customer is an error.
    pub async fn toggle_suspension(
        &self,
        customer_id: i64,
        currently_suspended: bool,
    ) -> ServiceResult<Notification> {
        let customer = self.customer(customer_id).await?;
        let brivo_id = customer
            .brivo_id
            .ok_or_else(|| AppError::customer_not_linked(customer_id))?;

        let notification = match self
            .access
            .set_suspended(brivo_id, !currently_suspended)
            .await
        {
            Ok(()) => {
                tracing::info!(customer_id, brivo_id, suspended = !currently_suspended, "Suspension toggled");
                Notification::success(
                    "Suspension Toggle Successful!",
                    "The user's suspension status was successfully changed.",
                )
            }
            Err(e) => {
                tracing::error!(customer_id, brivo_id, error = %e, "Suspension toggle failed");
                Notification::danger("Suspension Toggle Failed", e.to_string())
            }
        };
        Ok(notification)
    }
}
