#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::HeaderMap},
};
use restcrud::{
    AppState, HandlerOptions,
    config::AppConfig,
    database::{connect, init_schema},
    server::build_app,
};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::Value;
use tower::ServiceExt;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = connect("sqlite::memory:").await?;
    init_schema(&db).await?;
    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    let state = AppState::new(db, HandlerOptions { verbose: true });
    build_app(state, &AppConfig::default()).expect("default CORS origin is valid")
}

pub async fn fresh_app() -> Router {
    let db = setup_test_db().await.expect("Failed to setup test database");
    setup_test_app(db)
}

/// Send a request and decode the JSON body (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, json)
}

pub async fn create(app: &Router, plural: &str, payload: Value) -> Value {
    let (status, _, body) = send(app, "POST", &format!("/api/v1/{plural}"), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

/// Build a list URI with `_filters` JSON percent-encoded.
pub fn list_uri(plural: &str, filters: Option<&Value>, extra: &str) -> String {
    let mut params = Vec::new();
    if let Some(filters) = filters {
        let encoded = url_escape::encode_component(&filters.to_string()).to_string();
        params.push(format!("_filters={encoded}"));
    }
    if !extra.is_empty() {
        params.push(extra.to_string());
    }
    if params.is_empty() {
        format!("/api/v1/{plural}")
    } else {
        format!("/api/v1/{plural}?{}", params.join("&"))
    }
}

pub fn total_count(headers: &HeaderMap) -> u64 {
    headers
        .get("x-total-count")
        .expect("X-Total-Count header missing")
        .to_str()
        .unwrap()
        .parse()
        .unwrap()
}

pub fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("list body is an array")
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}
