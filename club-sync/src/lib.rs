//! club-sync: keeps club customers and memberships in step with Brivo
//!
//! - Customer hooks provision remote users and barcode credentials
//! - Membership hooks move customers in and out of access groups
//! - A scheduler mirrors the remote group list into a local cache
//! - Wizards reassign template groups and toggle suspension

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod scheduler;
pub mod services;
pub mod state;

pub use error::{ServiceError, ServiceResult};
pub use services::SyncService;
pub use state::AppState;
