//! Membership hooks: subscription confirm and close
//!
//! Group membership follows the subscription state. Access-service failures
//! are logged and reported, never returned: the local state change stands.

use serde::Serialize;
use shared::error::AppError;
use shared::models::{Subscription, SubscriptionState};
use shared::status::CallStatus;

use super::SyncService;
use crate::error::ServiceResult;

#[derive(Debug, Clone, Serialize)]
pub struct MembershipOutcome {
    pub subscription: Subscription,
    /// `None` when the template has no group or the customer no remote user
    pub group_sync: Option<CallStatus>,
}

#[derive(Clone, Copy)]
enum Membership {
    Join,
    Leave,
}

impl SyncService {
    /// Confirm a subscription and add the customer to the template's group.
    pub async fn confirm_subscription(&self, id: i64) -> ServiceResult<MembershipOutcome> {
        self.transition(id, SubscriptionState::InProgress, Membership::Join)
            .await
    }

    /// Close a subscription and remove the customer from the template's group.
    pub async fn close_subscription(&self, id: i64) -> ServiceResult<MembershipOutcome> {
        self.transition(id, SubscriptionState::Closed, Membership::Leave)
            .await
    }

    async fn transition(
        &self,
        id: i64,
        state: SubscriptionState,
        membership: Membership,
    ) -> ServiceResult<MembershipOutcome> {
        let mut subscription = self
            .store
            .get_subscription(id)
            .await?
            .ok_or_else(|| AppError::subscription_not_found(id))?;
        let template = self.template(subscription.template_id).await?;
        let group_id = self.template_remote_group(&template).await?;
        let user_id = self.customer(subscription.customer_id).await?.brivo_id;

        self.store.set_subscription_state(id, state).await?;
        subscription.state = state;

        let (Some(group_id), Some(user_id)) = (group_id, user_id) else {
            tracing::debug!(
                subscription_id = id,
                template_id = template.id,
                "No group or remote user, membership unchanged"
            );
            return Ok(MembershipOutcome {
                subscription,
                group_sync: None,
            });
        };

        let result = match membership {
            Membership::Join => self.access.add_to_group(group_id, user_id).await,
            Membership::Leave => self.access.remove_from_group(group_id, user_id).await,
        };
        match &result {
            Ok(()) => tracing::info!(subscription_id = id, group_id, user_id, "Group membership updated"),
            Err(e) => tracing::error!(
                subscription_id = id,
                group_id,
                user_id,
                error = %e,
                "Group membership update failed"
            ),
        }

        Ok(MembershipOutcome {
            subscription,
            group_sync: Some(CallStatus::from(&result)),
        })
    }
}
