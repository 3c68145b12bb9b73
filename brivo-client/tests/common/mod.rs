//! In-process mock of the Brivo auth and API hosts

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use brivo_client::{BrivoClient, BrivoConfig};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const CLIENT_ID: &str = "club-app";
pub const CLIENT_SECRET: &str = "club-secret";
pub const API_KEY: &str = "key-123";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub api_key: Option<String>,
    pub body: String,
}

impl RecordedCall {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct Inner {
    calls: Vec<RecordedCall>,
    token_forms: Vec<String>,
    reject_auth: bool,
    expires_in: Option<u64>,
    overrides: HashMap<String, (StatusCode, String)>,
    groups: Vec<Value>,
    suspended: bool,
}

#[derive(Clone, Default)]
pub struct MockBrivo {
    inner: Arc<Mutex<Inner>>,
}

impl MockBrivo {
    /// Start the mock on an ephemeral port, returning it and a client pointed at it
    pub async fn start() -> (Self, BrivoClient) {
        let mock = MockBrivo::default();
        mock.inner.lock().unwrap().expires_in = Some(3600);

        let app = Router::new().fallback(handle).with_state(mock.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base = format!("http://{addr}");
        let config = BrivoConfig::new(CLIENT_ID, CLIENT_SECRET, "admin", "hunter2", API_KEY)
            .with_hosts(base.clone(), base)
            .with_timeout(5);
        let client = BrivoClient::new(config).unwrap();
        (mock, client)
    }

    pub fn reject_auth(&self) {
        self.inner.lock().unwrap().reject_auth = true;
    }

    pub fn set_expires_in(&self, secs: Option<u64>) {
        self.inner.lock().unwrap().expires_in = secs;
    }

    /// Answer `METHOD /path` with a fixed status and raw body
    pub fn respond(&self, method: &str, path: &str, status: StatusCode, body: &str) {
        self.inner
            .lock()
            .unwrap()
            .overrides
            .insert(format!("{method} {path}"), (status, body.to_string()));
    }

    pub fn clear_override(&self, method: &str, path: &str) {
        self.inner
            .lock()
            .unwrap()
            .overrides
            .remove(&format!("{method} {path}"));
    }

    pub fn set_groups(&self, groups: &[(i64, &str)]) {
        self.inner.lock().unwrap().groups = groups
            .iter()
            .map(|(id, name)| json!({ "id": id, "name": name, "keypadUnlock": false }))
            .collect();
    }

    pub fn set_suspended(&self, suspended: bool) {
        self.inner.lock().unwrap().suspended = suspended;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn token_requests(&self) -> usize {
        self.inner.lock().unwrap().token_forms.len()
    }

    pub fn token_forms(&self) -> Vec<String> {
        self.inner.lock().unwrap().token_forms.clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, axum::Json(body)).into_response()
}

async fn handle(
    State(mock): State<MockBrivo>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    let mut inner = mock.inner.lock().unwrap();

    if path == "/oauth/token" {
        let expected = format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(format!("{CLIENT_ID}:{CLIENT_SECRET}"))
        );
        if inner.reject_auth
            || header(&headers, "authorization").as_deref() != Some(expected.as_str())
            || header(&headers, "api-key").as_deref() != Some(API_KEY)
        {
            return json_response(StatusCode::UNAUTHORIZED, json!({ "error": "invalid_client" }));
        }
        inner.token_forms.push(body);
        let n = inner.token_forms.len();
        return json_response(
            StatusCode::OK,
            json!({
                "access_token": format!("tok-{n}"),
                "token_type": "bearer",
                "expires_in": inner.expires_in,
            }),
        );
    }

    let authorization = header(&headers, "authorization");
    inner.calls.push(RecordedCall {
        method: method.clone(),
        path: path.clone(),
        authorization: authorization.clone(),
        api_key: header(&headers, "api-key"),
        body: body.clone(),
    });

    if !authorization.is_some_and(|a| a.starts_with("bearer tok-")) {
        return json_response(StatusCode::UNAUTHORIZED, json!({ "message": "no token" }));
    }

    if let Some((status, body)) = inner.overrides.get(&format!("{method} {path}")) {
        return Response::builder()
            .status(*status)
            .body(Body::from(body.clone()))
            .unwrap();
    }

    let segments: Vec<&str> = path.trim_start_matches("/v1/api/").split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("POST", ["users"]) => {
            let mut user: Value = serde_json::from_str(&body).unwrap_or(json!({}));
            user["id"] = json!(1001);
            json_response(StatusCode::OK, user)
        }
        ("PUT", ["users", id]) => {
            let mut user: Value = serde_json::from_str(&body).unwrap_or(json!({}));
            user["id"] = json!(id.parse::<i64>().unwrap_or(0));
            json_response(StatusCode::OK, user)
        }
        ("POST", ["credentials"]) => json_response(
            StatusCode::OK,
            json!({ "id": 2001, "referenceId": serde_json::from_str::<Value>(&body).unwrap_or_default()["referenceId"] }),
        ),
        ("GET", ["groups"]) => json_response(
            StatusCode::OK,
            json!({ "data": inner.groups, "offset": 0, "count": inner.groups.len() }),
        ),
        ("POST", ["groups"]) => {
            let mut group: Value = serde_json::from_str(&body).unwrap_or(json!({}));
            group["id"] = json!(3001);
            json_response(StatusCode::OK, group)
        }
        ("GET", ["users", _, "suspended"]) => {
            json_response(StatusCode::OK, json!({ "suspended": inner.suspended }))
        }
        // No-content endpoints answer with a body that is not JSON on purpose
        _ => Response::builder()
            .status(StatusCode::OK)
            .body(Body::from("ok, not json"))
            .unwrap(),
    }
}
