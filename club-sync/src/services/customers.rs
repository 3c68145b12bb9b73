//! Customer lifecycle hooks: create, update, archive

use brivo_client::{ClientError, NewUser, UserUpdate};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use shared::status::CallStatus;

use super::SyncService;
use crate::error::{ServiceError, ServiceResult};

/// Result of archiving a customer; the suspend call never fails the archive
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveOutcome {
    pub customer: Customer,
    /// `None` when the customer was never linked
    pub suspension: Option<CallStatus>,
}

fn name_error(customer_id: i64, e: ClientError) -> ServiceError {
    AppError::with_message(ErrorCode::CustomerNameInvalid, e.to_string())
        .with_detail("customer_id", customer_id)
        .into()
}

fn require_barcode(barcode: &str) -> ServiceResult<()> {
    if barcode.trim().is_empty() {
        return Err(AppError::validation("barcode must not be empty").into());
    }
    Ok(())
}

impl SyncService {
    /// Create a customer and provision its remote user and barcode credential.
    ///
    /// All or nothing: when any remote step fails, the remote user created
    /// here is deleted (best effort) and the local row is removed.
    pub async fn create_customer(&self, new: CustomerCreate) -> ServiceResult<Customer> {
        if new.name.trim().is_empty() {
            return Err(AppError::validation("name must not be empty").into());
        }
        require_barcode(&new.barcode)?;

        let customer = self.store.insert_customer(&new).await?;
        match self.provision(customer.clone()).await {
            Ok(linked) => {
                tracing::info!(
                    customer_id = linked.id,
                    brivo_id = ?linked.brivo_id,
                    "Customer created and provisioned"
                );
                Ok(linked)
            }
            Err(e) => {
                tracing::error!(customer_id = customer.id, error = %e, "Customer provisioning failed, discarding");
                if let Err(db_err) = self.store.delete_customer(customer.id).await {
                    tracing::error!(customer_id = customer.id, error = %db_err, "Failed to discard customer row");
                }
                Err(e)
            }
        }
    }

    /// Apply a patch and mirror it to the access service.
    ///
    /// On failure the previous profile is written back and the error returned.
    pub async fn update_customer(&self, id: i64, patch: CustomerUpdate) -> ServiceResult<Customer> {
        let previous = self.customer(id).await?;
        if let Some(barcode) = &patch.barcode {
            require_barcode(barcode)?;
        }

        let updated = patch.apply(&previous);
        self.store.save_customer(&updated).await?;

        if patch.skip_remote_sync {
            return Ok(updated);
        }

        match self.sync_update(updated, &patch).await {
            Ok(customer) => Ok(customer),
            Err(e) => {
                tracing::error!(customer_id = id, error = %e, "Customer update failed, restoring previous record");
                if let Err(db_err) = self.store.save_customer(&previous).await {
                    tracing::error!(customer_id = id, error = %db_err, "Failed to restore customer");
                }
                Err(e)
            }
        }
    }

    /// Mark a customer inactive and suspend its remote user.
    pub async fn archive_customer(&self, id: i64) -> ServiceResult<ArchiveOutcome> {
        let mut customer = self.customer(id).await?;
        self.store.set_customer_active(id, false).await?;
        customer.active = false;

        let suspension = match customer.brivo_id {
            Some(user_id) => {
                let result = self.access.set_suspended(user_id, true).await;
                if let Err(e) = &result {
                    tracing::warn!(customer_id = id, brivo_id = user_id, error = %e, "Failed to suspend archived customer");
                }
                Some(CallStatus::from(&result))
            }
            None => None,
        };

        Ok(ArchiveOutcome {
            customer,
            suspension,
        })
    }

    async fn sync_update(
        &self,
        mut customer: Customer,
        patch: &CustomerUpdate,
    ) -> ServiceResult<Customer> {
        let mut provisioned = false;
        if customer.active {
            let linked_id = customer.brivo_id;
            match linked_id {
                Some(user_id) => {
                    let update = UserUpdate::new(&customer.name, customer.email.as_deref())
                        .map_err(|e| name_error(customer.id, e))?;
                    self.access
                        .update_user(user_id, &update)
                        .await
                        .map_err(ServiceError::remote(ErrorCode::CustomerSyncFailed))?;
                }
                None => {
                    customer = self.provision(customer).await?;
                    provisioned = true;
                }
            }
        }

        // A fresh provision already issued a credential from the new barcode
        if patch.touches_barcode() && !provisioned {
            self.replace_credential(&mut customer).await?;
        }
        Ok(customer)
    }

    /// Create the remote user for an unlinked customer and issue its credential.
    ///
    /// If the credential step fails the remote user is deleted again and the
    /// link cleared, so the customer is left unlinked.
    async fn provision(&self, mut customer: Customer) -> ServiceResult<Customer> {
        let user = NewUser::new(customer.id, &customer.name, customer.email.as_deref())
            .map_err(|e| name_error(customer.id, e))?;
        let remote = self
            .access
            .create_user(&user)
            .await
            .map_err(ServiceError::remote(ErrorCode::CustomerProvisionFailed))?;

        self.store
            .set_customer_brivo_id(customer.id, Some(remote.id))
            .await?;
        customer.brivo_id = Some(remote.id);

        if let Err(e) = self.issue_credential(&mut customer).await {
            self.unlink_remote_user(&mut customer, remote.id).await;
            return Err(e);
        }
        Ok(customer)
    }

    async fn unlink_remote_user(&self, customer: &mut Customer, user_id: i64) {
        if let Err(e) = self.access.delete_user(user_id).await {
            tracing::error!(customer_id = customer.id, brivo_id = user_id, error = %e, "Failed to delete remote user during rollback");
        }
        if let Err(e) = self.store.set_customer_brivo_id(customer.id, None).await {
            tracing::error!(customer_id = customer.id, error = %e, "Failed to clear remote user id");
        }
        customer.brivo_id = None;
    }

    /// Delete the current credential (failure logged) and issue a new one.
    async fn replace_credential(&self, customer: &mut Customer) -> ServiceResult<()> {
        if !customer.is_linked() {
            tracing::debug!(customer_id = customer.id, "Barcode changed on unlinked customer, nothing to replace");
            return Ok(());
        }

        if let Some(old) = customer.brivo_credential_id.take() {
            if let Err(e) = self.access.delete_credential(old).await {
                tracing::warn!(customer_id = customer.id, credential_id = old, error = %e, "Failed to delete old credential");
            }
            self.store.set_customer_credential(customer.id, None).await?;
        }
        self.issue_credential(customer).await
    }

    /// Create a barcode credential, record it and assign it to the remote user.
    async fn issue_credential(&self, customer: &mut Customer) -> ServiceResult<()> {
        let Some(user_id) = customer.brivo_id else {
            return Err(AppError::customer_not_linked(customer.id).into());
        };

        let credential = self
            .access
            .create_barcode_credential(&customer.barcode)
            .await
            .map_err(ServiceError::remote(ErrorCode::CredentialIssueFailed))?;
        self.store
            .set_customer_credential(customer.id, Some(credential.id))
            .await?;
        customer.brivo_credential_id = Some(credential.id);

        if let Err(e) = self.access.assign_credential(user_id, credential.id).await {
            if let Err(del) = self.access.delete_credential(credential.id).await {
                tracing::warn!(credential_id = credential.id, error = %del, "Failed to delete unassigned credential");
            }
            self.store.set_customer_credential(customer.id, None).await?;
            customer.brivo_credential_id = None;
            return Err(ServiceError::remote(ErrorCode::CredentialAssignFailed)(e));
        }

        tracing::info!(
            customer_id = customer.id,
            brivo_id = user_id,
            credential_id = credential.id,
            "Barcode credential issued"
        );
        Ok(())
    }
}
