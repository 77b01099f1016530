#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};

use bizhub::prelude::*;

/// Full application over the in-memory backend.
pub fn test_server() -> TestServer {
    let app = init(&Config::default(), Backends::in_memory())
        .unwrap()
        .into_router();

    TestServer::new(app).unwrap()
}

pub async fn create_currency(server: &TestServer, code: &str) -> i64 {
    let response = server
        .post("/api/finance/currencies")
        .json(&json!({ "name": format!("Currency {code}"), "code": code }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_provider(server: &TestServer, tax_id: &str) -> i64 {
    let response = server
        .post("/api/providers")
        .json(&json!({ "name": "Acme Supplies", "tax_id": tax_id }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_invoice(
    server: &TestServer,
    number: &str,
    provider_id: i64,
    currency_id: i64,
) -> Value {
    let response = server
        .post("/api/invoicing/invoices")
        .json(&json!({
            "number": number,
            "provider_id": provider_id,
            "currency_id": currency_id,
            "amount_cents": 12_500
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Asserts the error envelope and returns its `details`.
pub fn assert_error(body: &Value, code: &str) -> Value {
    assert_eq!(body["error"]["code"], code, "unexpected error body: {body}");
    assert!(body["error"]["message"].is_string());
    body["error"]["details"].clone()
}
