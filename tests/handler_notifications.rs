mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

const ALICE: &str = "6f1c2c1e-8d3a-4c55-9a43-2f0e7b1d9a01";
const BOB: &str = "0b7e4f52-31d6-4a8e-bc1f-5d2a9c7e3b02";

async fn notify(server: &axum_test::TestServer, user_id: &str, title: &str) -> Value {
    let response = server
        .post("/api/notifications")
        .json(&json!({ "user_id": user_id, "title": title }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_inbox_newest_first_and_unread_filter() {
    let server = common::test_server();
    let first = notify(&server, ALICE, "Invoice issued").await;
    notify(&server, ALICE, "Invoice paid").await;
    notify(&server, BOB, "Someone else").await;

    assert_eq!(first["body"], "");
    assert_eq!(first["read_at"], Value::Null);

    let inbox = server
        .get(&format!("/api/notifications/users/{ALICE}"))
        .await
        .json::<Value>();
    let titles: Vec<&str> = inbox
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Invoice paid", "Invoice issued"]);

    let read = server
        .post(&format!("/api/notifications/{}/read", first["id"]))
        .await;
    read.assert_status_ok();
    let read_at = read.json::<Value>()["read_at"].clone();
    assert!(read_at.is_string());

    let again = server
        .post(&format!("/api/notifications/{}/read", first["id"]))
        .await
        .json::<Value>();
    assert_eq!(again["read_at"], read_at);

    let unread = server
        .get(&format!("/api/notifications/users/{ALICE}?unread_only=true"))
        .await
        .json::<Value>();
    assert_eq!(unread.as_array().unwrap().len(), 1);
    assert_eq!(unread[0]["title"], "Invoice paid");
}

#[tokio::test]
async fn test_blank_title_is_400() {
    let server = common::test_server();

    let response = server
        .post("/api/notifications")
        .json(&json!({ "user_id": ALICE, "title": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let details = common::assert_error(&response.json::<Value>(), "validation_error");
    assert!(details["fields"]["title"].is_array());

    let response = server
        .post("/api/notifications")
        .json(&json!({ "user_id": ALICE, "title": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let details = common::assert_error(&response.json::<Value>(), "validation_error");
    assert_eq!(details["fields"]["title"], json!(["blank"]));
}

#[tokio::test]
async fn test_malformed_user_id_is_400() {
    let server = common::test_server();

    let response = server.get("/api/notifications/users/not-a-uuid").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    common::assert_error(&response.json::<Value>(), "validation_error");
}

#[tokio::test]
async fn test_delete_notification() {
    let server = common::test_server();
    let created = notify(&server, BOB, "Welcome").await;
    let path = format!("/api/notifications/{}", created["id"]);

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);

    let missing = server.delete(&path).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    common::assert_error(&missing.json::<Value>(), "notification_not_found");
}
