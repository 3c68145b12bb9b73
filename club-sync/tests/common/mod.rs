//! Recording access-service fake and store fixtures for service tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use brivo_client::{
    AccessService, AccessToken, ClientError, ClientResult, NewUser, RemoteCredential, RemoteGroup,
    RemoteUser, UserUpdate,
};
use club_sync::SyncService;
use club_sync::db::{GroupChanges, MemoryStore, NewGroupRow, Store};
use http::StatusCode;
use shared::models::{BrivoGroup, Customer, CustomerCreate};

/// One access-service call as the fake saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Authenticate,
    CreateUser(NewUser),
    UpdateUser(i64, UserUpdate),
    DeleteUser(i64),
    CreateCredential(String),
    DeleteCredential(i64),
    AssignCredential { user: i64, credential: i64 },
    ListGroups,
    CreateGroup(String),
    AddToGroup { group: i64, user: i64 },
    RemoveFromGroup { group: i64, user: i64 },
    SuspendedStatus(i64),
    SetSuspended { user: i64, suspended: bool },
}

type FailRule = Box<dyn Fn(&Call) -> bool + Send + Sync>;

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    fail_rules: Vec<FailRule>,
    groups: Vec<RemoteGroup>,
    suspended: bool,
    next_user: i64,
    next_credential: i64,
    next_group: i64,
}

/// In-process stand-in for Brivo
///
/// Users get ids from 100, credentials from 900, groups from 500.
#[derive(Default)]
pub struct FakeAccess {
    inner: Mutex<Inner>,
}

impl FakeAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call matching `rule` answer 500
    pub fn fail_when(&self, rule: impl Fn(&Call) -> bool + Send + Sync + 'static) {
        self.inner.lock().unwrap().fail_rules.push(Box::new(rule));
    }

    pub fn heal(&self) {
        self.inner.lock().unwrap().fail_rules.clear();
    }

    pub fn set_groups(&self, groups: &[(i64, &str)]) {
        self.inner.lock().unwrap().groups = groups
            .iter()
            .map(|(id, name)| RemoteGroup {
                id: *id,
                name: name.to_string(),
            })
            .collect();
    }

    pub fn set_suspended(&self, suspended: bool) {
        self.inner.lock().unwrap().suspended = suspended;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    fn record(&self, call: Call) -> ClientResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let fails = inner.fail_rules.iter().any(|rule| rule(&call));
        inner.calls.push(call);
        if fails {
            return Err(ClientError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                url: "http://fake-brivo".to_string(),
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AccessService for FakeAccess {
    async fn authenticate(&self) -> ClientResult<AccessToken> {
        self.record(Call::Authenticate)?;
        Ok(AccessToken {
            access_token: "fake-token".to_string(),
            token_type: Some("bearer".to_string()),
            expires_in: Some(3600),
            scope: None,
        })
    }

    async fn create_user(&self, user: &NewUser) -> ClientResult<RemoteUser> {
        self.record(Call::CreateUser(user.clone()))?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_user += 1;
        Ok(RemoteUser {
            id: 99 + inner.next_user,
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            external_id: Some(user.external_id.clone()),
        })
    }

    async fn update_user(&self, user_id: i64, user: &UserUpdate) -> ClientResult<RemoteUser> {
        self.record(Call::UpdateUser(user_id, user.clone()))?;
        Ok(RemoteUser {
            id: user_id,
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            external_id: None,
        })
    }

    async fn delete_user(&self, user_id: i64) -> ClientResult<()> {
        self.record(Call::DeleteUser(user_id))
    }

    async fn create_barcode_credential(&self, barcode: &str) -> ClientResult<RemoteCredential> {
        self.record(Call::CreateCredential(barcode.to_string()))?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_credential += 1;
        Ok(RemoteCredential {
            id: 899 + inner.next_credential,
            reference_id: Some(barcode.to_string()),
        })
    }

    async fn delete_credential(&self, credential_id: i64) -> ClientResult<()> {
        self.record(Call::DeleteCredential(credential_id))
    }

    async fn assign_credential(&self, user_id: i64, credential_id: i64) -> ClientResult<()> {
        self.record(Call::AssignCredential {
            user: user_id,
            credential: credential_id,
        })
    }

    async fn list_groups(&self) -> ClientResult<Vec<RemoteGroup>> {
        self.record(Call::ListGroups)?;
        Ok(self.inner.lock().unwrap().groups.clone())
    }

    async fn create_group(&self, name: &str) -> ClientResult<RemoteGroup> {
        self.record(Call::CreateGroup(name.to_string()))?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_group += 1;
        let group = RemoteGroup {
            id: 499 + inner.next_group,
            name: name.to_string(),
        };
        inner.groups.push(group.clone());
        Ok(group)
    }

    async fn add_to_group(&self, group_id: i64, user_id: i64) -> ClientResult<()> {
        self.record(Call::AddToGroup {
            group: group_id,
            user: user_id,
        })
    }

    async fn remove_from_group(&self, group_id: i64, user_id: i64) -> ClientResult<()> {
        self.record(Call::RemoveFromGroup {
            group: group_id,
            user: user_id,
        })
    }

    async fn suspended_status(&self, user_id: i64) -> ClientResult<bool> {
        self.record(Call::SuspendedStatus(user_id))?;
        Ok(self.inner.lock().unwrap().suspended)
    }

    async fn set_suspended(&self, user_id: i64, suspended: bool) -> ClientResult<()> {
        self.record(Call::SetSuspended {
            user: user_id,
            suspended,
        })?;
        self.inner.lock().unwrap().suspended = suspended;
        Ok(())
    }
}

pub struct Harness {
    pub service: SyncService,
    pub store: Arc<MemoryStore>,
    pub access: Arc<FakeAccess>,
}

pub fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let access = Arc::new(FakeAccess::new());
    let service = SyncService::new(store.clone(), access.clone());
    Harness {
        service,
        store,
        access,
    }
}

pub fn new_customer(name: &str, barcode: &str) -> CustomerCreate {
    CustomerCreate {
        name: name.to_string(),
        email: Some(format!(
            "{}@example.com",
            name.split(' ').next().unwrap_or("member").to_lowercase()
        )),
        barcode: barcode.to_string(),
    }
}

impl Harness {
    /// Cache groups as a reconciliation run would
    pub async fn seed_groups(&self, groups: &[(&str, i64)]) -> Vec<BrivoGroup> {
        self.store
            .apply_group_changes(&GroupChanges {
                delete: vec![],
                create: groups
                    .iter()
                    .map(|(name, id)| NewGroupRow {
                        name: name.to_string(),
                        brivo_group_id: *id,
                    })
                    .collect(),
            })
            .await
            .unwrap();
        self.store.list_groups().await.unwrap()
    }

    /// Customer row already linked to a remote user, without any remote calls
    pub async fn linked_customer(&self, name: &str, brivo_id: i64) -> Customer {
        let customer = self
            .store
            .insert_customer(&new_customer(name, "LINKED"))
            .await
            .unwrap();
        self.store
            .set_customer_brivo_id(customer.id, Some(brivo_id))
            .await
            .unwrap();
        self.store
            .set_customer_credential(customer.id, Some(brivo_id + 1000))
            .await
            .unwrap();
        self.store.get_customer(customer.id).await.unwrap().unwrap()
    }
}
