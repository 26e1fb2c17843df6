mod common;

use axum::http::StatusCode;
use common::{create, fresh_app, list_uri, send, total_count};
use serde_json::json;

#[tokio::test]
async fn test_user_lifecycle() {
    let app = fresh_app().await;

    let created = create(
        &app,
        "users",
        json!({
            "name": "ada",
            "mail": "ada@example.org",
            "status": "active",
            "comment": "first operator",
            "pass": "s3cret"
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["mail"], "ada@example.org");
    assert!(created.get("pass").is_none());
    assert!(created.get("email").is_none());

    let (status, _, updated) = send(
        &app,
        "PUT",
        &format!("/api/v1/users/{id}"),
        Some(json!({"name": "ada lovelace", "mail": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "ada lovelace");
    assert_eq!(updated["mail"], "ada@example.com");
    assert_eq!(updated["comment"], "");

    let (status, _, body) = send(&app, "DELETE", &format!("/api/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[format!("id #{id}")], "deleted");
}

#[tokio::test]
async fn test_only_name_is_mandatory() {
    let app = fresh_app().await;

    let (status, _, body) = send(&app, "POST", "/api/v1/users", Some(json!({"mail": "x@y.z"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Mandatory fields are empty: name");

    let minimal = create(&app, "users", json!({"name": "grace"})).await;
    assert_eq!(minimal["mail"], "");
}

#[tokio::test]
async fn test_users_filter_on_email_column() {
    let app = fresh_app().await;
    create(&app, "users", json!({"name": "ada", "mail": "ada@example.org"})).await;
    create(&app, "users", json!({"name": "alan", "mail": "alan@example.com"})).await;

    let filters = json!({"email": ".org"});
    let (status, headers, body) = send(&app, "GET", &list_uri("users", Some(&filters), ""), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(total_count(&headers), 1);
    assert_eq!(body[0]["name"], "ada");
}

#[tokio::test]
async fn test_password_cannot_be_sensord_through_filters() {
    let app = fresh_app().await;
    create(&app, "users", json!({"name": "ada", "pass": "hunter2"})).await;
    create(&app, "users", json!({"name": "alan", "pass": "letmein"})).await;

    let filters = json!({"pass": "hunter"});
    let (status, headers, _) = send(&app, "GET", &list_uri("users", Some(&filters), ""), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(total_count(&headers), 2);
}

#[tokio::test]
async fn test_agents_and_users_are_counted_separately() {
    let app = fresh_app().await;
    create(&app, "users", json!({"name": "ada"})).await;
    create(&app, "agents", json!({"name": "sensor", "ip": "10.0.0.1"})).await;
    create(&app, "agents", json!({"name": "relay", "ip": "10.0.0.2"})).await;

    let (_, headers, _) = send(&app, "GET", "/api/v1/agents", None).await;
    assert_eq!(total_count(&headers), 2);
    let (_, headers, _) = send(&app, "GET", "/api/v1/users", None).await;
    assert_eq!(total_count(&headers), 1);
}
