mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_missing_currency_is_rejected() {
    let server = common::test_server();
    let provider_id = common::create_provider(&server, "B-12345678").await;

    let response = server
        .post("/api/invoicing/invoices")
        .json(&json!({
            "number": "INV-001",
            "provider_id": provider_id,
            "currency_id": 999,
            "amount_cents": 100
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let details =
        common::assert_error(&response.json::<Value>(), "invoice_reference_not_found");
    assert_eq!(details["entity_name"], "currency");
    assert_eq!(details["entity_id"], 999);
}

#[tokio::test]
async fn test_missing_provider_is_checked_first() {
    let server = common::test_server();

    let response = server
        .post("/api/invoicing/invoices")
        .json(&json!({
            "number": "INV-001",
            "provider_id": 5,
            "currency_id": 6,
            "amount_cents": 100
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let details =
        common::assert_error(&response.json::<Value>(), "invoice_reference_not_found");
    assert_eq!(details["entity_name"], "provider");
}

#[tokio::test]
async fn test_invoice_lifecycle() {
    let server = common::test_server();
    let provider_id = common::create_provider(&server, "B-12345678").await;
    let currency_id = common::create_currency(&server, "EUR").await;

    let invoice = common::create_invoice(&server, "INV-001", provider_id, currency_id).await;
    assert_eq!(invoice["status"], "draft");
    assert_eq!(invoice["issued_at"], Value::Null);
    let path = format!("/api/invoicing/invoices/{}", invoice["id"]);

    let edited = server.patch(&path).json(&json!({ "amount_cents": 9_900 })).await;
    edited.assert_status_ok();
    assert_eq!(edited.json::<Value>()["amount_cents"], 9_900);

    let issued = server.patch(&path).json(&json!({ "status": "issued" })).await;
    issued.assert_status_ok();
    let issued = issued.json::<Value>();
    assert_eq!(issued["status"], "issued");
    assert!(issued["issued_at"].is_string());

    let frozen = server.patch(&path).json(&json!({ "amount_cents": 1 })).await;
    frozen.assert_status(StatusCode::CONFLICT);
    common::assert_error(&frozen.json::<Value>(), "invoice_not_editable");

    let backwards = server.patch(&path).json(&json!({ "status": "draft" })).await;
    backwards.assert_status(StatusCode::CONFLICT);
    let details = common::assert_error(&backwards.json::<Value>(), "invoice_invalid_transition");
    assert_eq!(details["from"], "issued");
    assert_eq!(details["to"], "draft");

    server
        .patch(&path)
        .json(&json!({ "status": "paid" }))
        .await
        .assert_status_ok();

    let not_draft = server.delete(&path).await;
    not_draft.assert_status(StatusCode::CONFLICT);
    common::assert_error(&not_draft.json::<Value>(), "invoice_not_editable");
}

#[tokio::test]
async fn test_duplicate_number_conflicts() {
    let server = common::test_server();
    let provider_id = common::create_provider(&server, "B-12345678").await;
    let currency_id = common::create_currency(&server, "EUR").await;
    common::create_invoice(&server, "INV-001", provider_id, currency_id).await;

    let response = server
        .post("/api/invoicing/invoices")
        .json(&json!({
            "number": " INV-001 ",
            "provider_id": provider_id,
            "currency_id": currency_id,
            "amount_cents": 1
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    common::assert_error(&response.json::<Value>(), "invoice_duplicated");
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let server = common::test_server();
    let provider_id = common::create_provider(&server, "B-12345678").await;
    let currency_id = common::create_currency(&server, "EUR").await;

    let first = common::create_invoice(&server, "INV-001", provider_id, currency_id).await;
    common::create_invoice(&server, "INV-002", provider_id, currency_id).await;

    server
        .patch(&format!("/api/invoicing/invoices/{}", first["id"]))
        .json(&json!({ "status": "issued" }))
        .await
        .assert_status_ok();

    let issued = server.get("/api/invoicing/invoices?status=issued").await;
    issued.assert_status_ok();
    let items = issued.json::<Value>()["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["number"], "INV-001");

    let all = server.get("/api/invoicing/invoices").await.json::<Value>();
    assert_eq!(all["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_blank_number_is_400() {
    let server = common::test_server();
    let provider_id = common::create_provider(&server, "TAX-BLANK").await;
    let currency_id = common::create_currency(&server, "EUR").await;

    let response = server
        .post("/api/invoicing/invoices")
        .json(&json!({
            "number": "   ",
            "provider_id": provider_id,
            "currency_id": currency_id,
            "amount_cents": 100
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let details = common::assert_error(&response.json::<Value>(), "validation_error");
    assert_eq!(details["fields"]["number"], json!(["blank"]));
}
