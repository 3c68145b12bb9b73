//! Group endpoints

use reqwest::Method;

use crate::types::{GroupList, RemoteGroup};
use crate::{BrivoClient, ClientResult};

#[derive(serde::Serialize)]
struct NewGroup<'a> {
    name: &'a str,
}

impl BrivoClient {
    /// GET /v1/api/groups (single page, no pagination)
    pub async fn list_groups(&self) -> ClientResult<Vec<RemoteGroup>> {
        let list: GroupList = self.call(Method::GET, "groups", None::<&()>).await?;
        Ok(list.data)
    }

    /// POST /v1/api/groups
    pub async fn create_group(&self, name: &str) -> ClientResult<RemoteGroup> {
        self.call(Method::POST, "groups", Some(&NewGroup { name }))
            .await
    }

    /// PUT /v1/api/groups/{group}/users/{user}
    pub async fn add_to_group(&self, group_id: i64, user_id: i64) -> ClientResult<()> {
        self.call_no_content(
            Method::PUT,
            &format!("groups/{group_id}/users/{user_id}"),
            None::<&()>,
        )
        .await
    }

    /// DELETE /v1/api/groups/{group}/users/{user}
    pub async fn remove_from_group(&self, group_id: i64, user_id: i64) -> ClientResult<()> {
        self.call_no_content(
            Method::DELETE,
            &format!("groups/{group_id}/users/{user_id}"),
            None::<&()>,
        )
        .await
    }
}
