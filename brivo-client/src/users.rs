//! User endpoints

use reqwest::Method;

use crate::types::{NewUser, RemoteUser, Suspended, UserUpdate};
use crate::{BrivoClient, ClientResult};

impl BrivoClient {
    /// POST /v1/api/users
    pub async fn create_user(&self, user: &NewUser) -> ClientResult<RemoteUser> {
        self.call(Method::POST, "users", Some(user)).await
    }

    /// PUT /v1/api/users/{id}
    pub async fn update_user(&self, user_id: i64, user: &UserUpdate) -> ClientResult<RemoteUser> {
        self.call(Method::PUT, &format!("users/{user_id}"), Some(user))
            .await
    }

    /// DELETE /v1/api/users/{id}
    pub async fn delete_user(&self, user_id: i64) -> ClientResult<()> {
        self.call_no_content(Method::DELETE, &format!("users/{user_id}"), None::<&()>)
            .await
    }

    /// GET /v1/api/users/{id}/suspended
    pub async fn suspended_status(&self, user_id: i64) -> ClientResult<bool> {
        let status: Suspended = self
            .call(Method::GET, &format!("users/{user_id}/suspended"), None::<&()>)
            .await?;
        Ok(status.suspended)
    }

    /// PUT /v1/api/users/{id}/suspended
    pub async fn set_suspended(&self, user_id: i64, suspended: bool) -> ClientResult<()> {
        self.call_no_content(
            Method::PUT,
            &format!("users/{user_id}/suspended"),
            Some(&Suspended { suspended }),
        )
        .await
    }
}
