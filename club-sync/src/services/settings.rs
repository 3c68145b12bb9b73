//! Connection check for the settings screen

use shared::models::Notification;

use super::SyncService;

impl SyncService {
    /// Run the password grant with the configured credentials.
    pub async fn test_connection(&self) -> Notification {
        match self.access.authenticate().await {
            Ok(_) => Notification::success("Brivo Test Connection", "Connection successful."),
            Err(e) => {
                tracing::warn!(error = %e, "Brivo connection test failed");
                Notification::danger("Brivo Test Connection", format!("Connection failed: {e}"))
            }
        }
    }
}
