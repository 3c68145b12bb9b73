//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity with its access-service linkage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub barcode: String,
    pub active: bool,
    /// Remote user id, empty until the first successful remote creation
    pub brivo_id: Option<i64>,
    /// Remote barcode credential id, empty until the first credential is issued
    pub brivo_credential_id: Option<i64>,
}

impl Customer {
    pub fn is_linked(&self) -> bool {
        self.brivo_id.is_some()
    }
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub email: Option<String>,
    pub barcode: String,
}

/// Update customer payload
///
/// A field set to `Some` is part of the write, even when the value did not
/// change. An empty `email` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub barcode: Option<String>,
    /// Write the local row only, without touching the access service
    #[serde(default)]
    pub skip_remote_sync: bool,
}

impl CustomerUpdate {
    /// Apply this patch onto a customer, returning the patched copy
    pub fn apply(&self, customer: &Customer) -> Customer {
        let mut updated = customer.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(email) = &self.email {
            updated.email = Some(email.clone()).filter(|e| !e.is_empty());
        }
        if let Some(barcode) = &self.barcode {
            updated.barcode = barcode.clone();
        }
        updated
    }

    pub fn touches_barcode(&self) -> bool {
        self.barcode.is_some()
    }
}
