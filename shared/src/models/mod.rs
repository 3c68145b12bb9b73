//! Data models
//!
//! Local rows mirrored or linked to the access service.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (Postgres BIGINT).

pub mod customer;
pub mod group;
pub mod notification;
pub mod subscription;

// Re-exports
pub use customer::*;
pub use group::*;
pub use notification::*;
pub use subscription::*;
