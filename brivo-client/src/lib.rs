//! Brivo Client - REST client for the Brivo access-control service
//!
//! Wraps the password-grant token endpoint and the user, credential and
//! group endpoints the club sync needs. Every operation returns a
//! [`ClientResult`]; callers decide whether a failure aborts or is logged.

pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod token;
pub mod types;

mod credentials;
mod groups;
mod users;

pub use config::BrivoConfig;
pub use error::{ClientError, ClientResult};
pub use http::BrivoClient;
pub use service::AccessService;
pub use token::TokenCache;
pub use types::{
    AccessToken, NewUser, RemoteCredential, RemoteGroup, RemoteUser, UNKNOWN_CREDENTIAL_FORMAT,
    UserUpdate,
};
