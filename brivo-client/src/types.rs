//! Request and response bodies of the Brivo REST API

use serde::{Deserialize, Serialize};

use crate::{ClientError, ClientResult};

/// Credential format id Brivo lists as "Unknown"; used for barcode credentials
pub const UNKNOWN_CREDENTIAL_FORMAT: i64 = 110;

/// Token endpoint response (password grant)
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds; absent means the token is not cached
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
    pub address: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl EmailAddress {
    fn personal(address: &str) -> Self {
        Self {
            address: address.to_string(),
            kind: "personal".to_string(),
        }
    }
}

/// Split a free-text name on its first space into (first, last)
pub fn split_name(name: &str) -> ClientResult<(String, String)> {
    let (first, last) = name
        .trim()
        .split_once(' ')
        .ok_or_else(|| ClientError::Validation(format!("name '{name}' has no last name")))?;
    let (first, last) = (first.trim(), last.trim());
    if first.is_empty() || last.is_empty() {
        return Err(ClientError::Validation(format!(
            "name '{name}' has no last name"
        )));
    }
    Ok((first.to_string(), last.to_string()))
}

fn emails_for(email: Option<&str>) -> Vec<EmailAddress> {
    email
        .filter(|e| !e.is_empty())
        .map(EmailAddress::personal)
        .into_iter()
        .collect()
}

/// POST /v1/api/users body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    /// Local customer id
    pub external_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<EmailAddress>,
}

impl NewUser {
    pub fn new(external_id: i64, name: &str, email: Option<&str>) -> ClientResult<Self> {
        let (first_name, last_name) = split_name(name)?;
        Ok(Self {
            first_name,
            last_name,
            external_id: external_id.to_string(),
            emails: emails_for(email),
        })
    }
}

/// PUT /v1/api/users/{id} body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<EmailAddress>,
}

impl UserUpdate {
    pub fn new(name: &str, email: Option<&str>) -> ClientResult<Self> {
        let (first_name, last_name) = split_name(name)?;
        Ok(Self {
            first_name,
            last_name,
            emails: emails_for(email),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CredentialFormat {
    pub id: i64,
}

/// POST /v1/api/credentials body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewCredential {
    pub credential_format: CredentialFormat,
    pub reference_id: String,
    pub encoded_credential: String,
}

impl NewCredential {
    pub fn barcode(barcode: &str) -> Self {
        Self {
            credential_format: CredentialFormat {
                id: UNKNOWN_CREDENTIAL_FORMAT,
            },
            reference_id: barcode.to_string(),
            encoded_credential: barcode.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCredential {
    pub id: i64,
    #[serde(default)]
    pub reference_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteGroup {
    pub id: i64,
    pub name: String,
}

/// GET /v1/api/groups response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GroupList {
    #[serde(default)]
    pub data: Vec<RemoteGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Suspended {
    pub suspended: bool,
}
