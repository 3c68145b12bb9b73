//! Credential endpoints

use reqwest::Method;

use crate::types::{NewCredential, RemoteCredential};
use crate::{BrivoClient, ClientResult};

impl BrivoClient {
    /// POST /v1/api/credentials with the barcode as both reference and encoding
    pub async fn create_barcode_credential(&self, barcode: &str) -> ClientResult<RemoteCredential> {
        self.call(
            Method::POST,
            "credentials",
            Some(&NewCredential::barcode(barcode)),
        )
        .await
    }

    /// DELETE /v1/api/credentials/{id}
    pub async fn delete_credential(&self, credential_id: i64) -> ClientResult<()> {
        self.call_no_content(
            Method::DELETE,
            &format!("credentials/{credential_id}"),
            None::<&()>,
        )
        .await
    }

    /// PUT /v1/api/users/{user}/credentials/{credential}
    pub async fn assign_credential(&self, user_id: i64, credential_id: i64) -> ClientResult<()> {
        self.call_no_content(
            Method::PUT,
            &format!("users/{user_id}/credentials/{credential_id}"),
            None::<&()>,
        )
        .await
    }
}
