mod common;

use axum::http::StatusCode;
use serde_json::Value;

const OWNER: &str = "6f1c2c1e-8d3a-4c55-9a43-2f0e7b1d9a01";

#[tokio::test]
async fn test_upload_and_download() {
    let server = common::test_server();

    let response = server
        .post("/api/files")
        .add_query_param("owner_id", OWNER)
        .add_query_param("file_name", "notes.txt")
        .bytes("hello bizhub".into())
        .content_type("text/plain")
        .await;

    response.assert_status(StatusCode::CREATED);
    let file = response.json::<Value>();
    assert_eq!(file["file_name"], "notes.txt");
    assert_eq!(file["size_bytes"], 12);
    assert_eq!(file["content_type"], "text/plain");
    assert!(file.get("storage_key").is_none());

    let content = server
        .get(&format!("/api/files/{}/content", file["id"]))
        .await;
    content.assert_status_ok();
    assert_eq!(content.as_bytes().as_ref(), b"hello bizhub");
    assert_eq!(content.header("content-type"), "text/plain");
    assert_eq!(
        content.header("content-disposition"),
        "attachment; filename=\"notes.txt\""
    );

    let owned = server
        .get(&format!("/api/files/owners/{OWNER}"))
        .await
        .json::<Value>();
    assert_eq!(owned.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_upload_is_rejected() {
    let server = common::test_server();

    let response = server
        .post("/api/files")
        .add_query_param("owner_id", OWNER)
        .add_query_param("file_name", "empty.bin")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    common::assert_error(&response.json::<Value>(), "file_empty");
}

#[tokio::test]
async fn test_file_name_with_path_is_rejected() {
    let server = common::test_server();

    let response = server
        .post("/api/files")
        .add_query_param("owner_id", OWNER)
        .add_query_param("file_name", "../etc/passwd")
        .bytes("x".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    common::assert_error(&response.json::<Value>(), "file_name_invalid");
}

#[tokio::test]
async fn test_delete_file() {
    let server = common::test_server();

    let file = server
        .post("/api/files")
        .add_query_param("owner_id", OWNER)
        .add_query_param("file_name", "data.bin")
        .bytes(vec![1_u8, 2, 3].into())
        .await
        .json::<Value>();
    assert_eq!(file["content_type"], "application/octet-stream");

    let path = format!("/api/files/{}", file["id"]);
    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);

    let missing = server.get(&path).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    common::assert_error(&missing.json::<Value>(), "file_not_found");
}

#[tokio::test]
async fn test_malformed_owner_id_is_400() {
    let server = common::test_server();

    let response = server
        .post("/api/files")
        .add_query_param("owner_id", "42")
        .add_query_param("file_name", "notes.txt")
        .bytes("hello".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    common::assert_error(&response.json::<Value>(), "validation_error");
}
