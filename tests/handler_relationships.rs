mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

const ALICE: &str = "6f1c2c1e-8d3a-4c55-9a43-2f0e7b1d9a01";
const BOB: &str = "0b7e4f52-31d6-4a8e-bc1f-5d2a9c7e3b02";

#[tokio::test]
async fn test_link_and_resolve_records_across_modules() {
    let server = common::test_server();
    let currency_id = common::create_currency(&server, "EUR").await;
    let provider_id = common::create_provider(&server, "B-12345678").await;

    for (entity_name, entity_id) in [("currency", currency_id), ("provider", provider_id)] {
        server
            .post("/api/relationships")
            .json(&json!({ "user_id": ALICE, "entity_name": entity_name, "entity_id": entity_id }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get(&format!("/api/relationships/users/{ALICE}/resolved"))
        .await;
    response.assert_status_ok();

    let resolved = response.json::<Value>();
    let resolved = resolved.as_array().unwrap();
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0]["entity_name"], "currency");
    assert_eq!(resolved[0]["record"]["code"], "EUR");
    assert_eq!(resolved[1]["entity_name"], "provider");
    assert_eq!(resolved[1]["record"]["tax_id"], "B-12345678");

    let filtered = server
        .get(&format!("/api/relationships/users/{ALICE}?entity_name=provider"))
        .await
        .json::<Value>();
    assert_eq!(filtered.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleted_target_resolves_to_null() {
    let server = common::test_server();
    let currency_id = common::create_currency(&server, "GBP").await;

    server
        .post("/api/relationships")
        .json(&json!({ "user_id": BOB, "entity_name": "currency", "entity_id": currency_id }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .delete(&format!("/api/finance/currencies/{currency_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let resolved = server
        .get(&format!("/api/relationships/users/{BOB}/resolved"))
        .await
        .json::<Value>();
    assert_eq!(resolved[0]["record"], Value::Null);
}

#[tokio::test]
async fn test_unknown_entity_name_is_400() {
    let server = common::test_server();

    let response = server
        .post("/api/relationships")
        .json(&json!({ "user_id": ALICE, "entity_name": "spaceship", "entity_id": 1 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let details = common::assert_error(&response.json::<Value>(), "unknown_entity_name");
    assert_eq!(details["entity_name"], "spaceship");

    server
        .get(&format!("/api/relationships/users/{ALICE}?entity_name=spaceship"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_target_and_duplicate_link() {
    let server = common::test_server();

    let missing = server
        .post("/api/relationships")
        .json(&json!({ "user_id": ALICE, "entity_name": "currency", "entity_id": 77 }))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    common::assert_error(&missing.json::<Value>(), "relationship_target_not_found");

    let currency_id = common::create_currency(&server, "CHF").await;
    let body = json!({ "user_id": ALICE, "entity_name": "currency", "entity_id": currency_id });

    server
        .post("/api/relationships")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);

    let duplicate = server.post("/api/relationships").json(&body).await;
    duplicate.assert_status(StatusCode::CONFLICT);
    common::assert_error(&duplicate.json::<Value>(), "relationship_duplicated");
}

#[tokio::test]
async fn test_delete_link() {
    let server = common::test_server();
    let currency_id = common::create_currency(&server, "SEK").await;

    server
        .post("/api/relationships")
        .json(&json!({ "user_id": BOB, "entity_name": "currency", "entity_id": currency_id }))
        .await
        .assert_status(StatusCode::CREATED);

    let path = format!("/api/relationships/users/{BOB}/currency/{currency_id}");
    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);

    let again = server.delete(&path).await;
    again.assert_status(StatusCode::NOT_FOUND);
    common::assert_error(&again.json::<Value>(), "relationship_not_found");
}
