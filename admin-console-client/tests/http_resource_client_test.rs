//! HttpResourceClient 端到端测试（本地 stub 服务器）

mod common;

use admin_console_client::{ClientError, ResourceClient, UpdateMethod};
use common::{record, StubServer};
use serde_json::json;

#[tokio::test]
async fn get_all_issues_get_on_collection() {
    let mut server = StubServer::start(vec![(
        200,
        r#"[{"id":1,"name":"Admin"},{"id":2,"name":"Viewer"}]"#,
    )])
    .await;
    let client = server.client("roles");

    let records = client.get_all().await.unwrap();

    let request = server.next_request().await;
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/roles");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].text("name").as_deref(), Some("Viewer"));
}

#[tokio::test]
async fn get_all_non_array_coerced_to_empty() {
    let server = StubServer::start(vec![(200, r#"{"data":[]}"#)]).await;
    let client = server.client("roles");

    let records = client.get_all().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn get_all_server_error_without_message_is_transport() {
    let server = StubServer::start(vec![(500, "")]).await;
    let client = server.client("roles");

    let err = client.get_all().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }), "{err:?}");
}

#[tokio::test]
async fn unreachable_server_is_transport() {
    let config = admin_console_client::ClientConfig::new("http://127.0.0.1:1");
    let client = admin_console_client::HttpResourceClient::new(&config, "roles").unwrap();

    let err = client.get_all().await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
}

#[tokio::test]
async fn create_posts_json_and_returns_server_record() {
    let mut server =
        StubServer::start(vec![(201, r#"{"id":10,"code":"SI-1","description":"Uptime"}"#)])
            .await;
    let client = server.client("success-indicators");
    let draft = record(json!({"code": "SI-1", "description": "Uptime"}));

    let created = client.create(&draft).await.unwrap();

    let request = server.next_request().await;
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/success-indicators");
    let sent: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(sent, json!({"code": "SI-1", "description": "Uptime"}));
    assert_eq!(created.key_string("id").as_deref(), Some("10"));
}

#[tokio::test]
async fn create_merges_partial_response_into_submitted_record() {
    let server = StubServer::start(vec![(201, r#"{"id":10}"#)]).await;
    let client = server.client("roles");

    let created = client
        .create(&record(json!({"name": "Auditor"})))
        .await
        .unwrap();

    assert_eq!(created.key_string("id").as_deref(), Some("10"));
    assert_eq!(created.text("name").as_deref(), Some("Auditor"));
}

#[tokio::test]
async fn create_rejected_surfaces_server_message() {
    let server = StubServer::start(vec![(422, r#"{"message":"Code already exists"}"#)]).await;
    let client = server.client("success-indicators");

    let err = client
        .create(&record(json!({"code": "SI-1"})))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Code already exists");
    assert!(matches!(err, ClientError::Rejected { status: 422, .. }));
}

#[tokio::test]
async fn update_uses_configured_verb_and_key_path() {
    let mut server = StubServer::start(vec![(200, r#"{"id":"r 1","name":"Ops"}"#)]).await;
    let config = server.config.clone().with_update_method(UpdateMethod::Patch);
    let client = admin_console_client::HttpResourceClient::new(&config, "roles").unwrap();

    let updated = client
        .update("r 1", &record(json!({"id": "r 1", "name": "Ops"})))
        .await
        .unwrap();

    let request = server.next_request().await;
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, "/api/roles/r%201");
    assert_eq!(updated.text("name").as_deref(), Some("Ops"));
}

#[tokio::test]
async fn update_missing_key_is_not_found() {
    let server = StubServer::start(vec![(404, "")]).await;
    let client = server.client("roles");

    let err = client
        .update("99", &record(json!({"name": "Ghost"})))
        .await
        .unwrap_err();
    assert!(
        matches!(&err, ClientError::NotFound { key, .. } if key == "99"),
        "{err:?}"
    );
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let mut server = StubServer::start(vec![(204, "")]).await;
    let client = server.client("roles");

    client.delete("X").await.unwrap();

    let request = server.next_request().await;
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/api/roles/X");
}

#[tokio::test]
async fn delete_server_message_is_server_error() {
    let server = StubServer::start(vec![(503, r#"{"error":"Read-only mode"}"#)]).await;
    let client = server.client("roles");

    let err = client.delete("X").await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 503, .. }), "{err:?}");
    assert_eq!(err.user_message(), "Read-only mode");
}
