//! The access-service seam
//!
//! Sync logic talks to [`AccessService`] rather than to [`BrivoClient`]
//! directly, so tests can substitute a recording fake.

use async_trait::async_trait;

use crate::types::{AccessToken, NewUser, RemoteCredential, RemoteGroup, RemoteUser, UserUpdate};
use crate::{BrivoClient, ClientResult};

#[async_trait]
pub trait AccessService: Send + Sync {
    /// Password-grant authentication (connection test)
    async fn authenticate(&self) -> ClientResult<AccessToken>;

    async fn create_user(&self, user: &NewUser) -> ClientResult<RemoteUser>;
    async fn update_user(&self, user_id: i64, user: &UserUpdate) -> ClientResult<RemoteUser>;
    async fn delete_user(&self, user_id: i64) -> ClientResult<()>;

    async fn create_barcode_credential(&self, barcode: &str) -> ClientResult<RemoteCredential>;
    async fn delete_credential(&self, credential_id: i64) -> ClientResult<()>;
    async fn assign_credential(&self, user_id: i64, credential_id: i64) -> ClientResult<()>;

    async fn list_groups(&self) -> ClientResult<Vec<RemoteGroup>>;
    async fn create_group(&self, name: &str) -> ClientResult<RemoteGroup>;
    async fn add_to_group(&self, group_id: i64, user_id: i64) -> ClientResult<()>;
    async fn remove_from_group(&self, group_id: i64, user_id: i64) -> ClientResult<()>;

    async fn suspended_status(&self, user_id: i64) -> ClientResult<bool>;
    async fn set_suspended(&self, user_id: i64, suspended: bool) -> ClientResult<()>;
}

#[async_trait]
impl AccessService for BrivoClient {
    async fn authenticate(&self) -> ClientResult<AccessToken> {
        BrivoClient::authenticate(self).await
    }

    async fn create_user(&self, user: &NewUser) -> ClientResult<RemoteUser> {
        BrivoClient::create_user(self, user).await
    }

    async fn update_user(&self, user_id: i64, user: &UserUpdate) -> ClientResult<RemoteUser> {
        BrivoClient::update_user(self, user_id, user).await
    }

    async fn delete_user(&self, user_id: i64) -> ClientResult<()> {
        BrivoClient::delete_user(self, user_id).await
    }

    async fn create_barcode_credential(&self, barcode: &str) -> ClientResult<RemoteCredential> {
        BrivoClient::create_barcode_credential(self, barcode).await
    }

    async fn delete_credential(&self, credential_id: i64) -> ClientResult<()> {
        BrivoClient::delete_credential(self, credential_id).await
    }

    async fn assign_credential(&self, user_id: i64, credential_id: i64) -> ClientResult<()> {
        BrivoClient::assign_credential(self, user_id, credential_id).await
    }

    async fn list_groups(&self) -> ClientResult<Vec<RemoteGroup>> {
        BrivoClient::list_groups(self).await
    }

    async fn create_group(&self, name: &str) -> ClientResult<RemoteGroup> {
        BrivoClient::create_group(self, name).await
    }

    async fn add_to_group(&self, group_id: i64, user_id: i64) -> ClientResult<()> {
        BrivoClient::add_to_group(self, group_id, user_id).await
    }

    async fn remove_from_group(&self, group_id: i64, user_id: i64) -> ClientResult<()> {
        BrivoClient::remove_from_group(self, group_id, user_id).await
    }

    async fn suspended_status(&self, user_id: i64) -> ClientResult<bool> {
        BrivoClient::suspended_status(self, user_id).await
    }

    async fn set_suspended(&self, user_id: i64, suspended: bool) -> ClientResult<()> {
        BrivoClient::set_suspended(self, user_id, suspended).await
    }
}
