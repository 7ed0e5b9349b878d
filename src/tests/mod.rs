
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::DirectoryClient;

use test_support::{CORP_SECRET, base_config, capture_logs, mount_gettoken};

#[tokio::test]
async fn token_fetch_emits_events_without_leaking_secrets() {
    let server = MockServer::start().await;
    mount_gettoken(&server, "tok-abc123").await;

    let (lines, guard) = capture_logs();
    let client = DirectoryClient::new(base_config(&server)).expect("client");
    let token = client.authenticate().await.expect("token");
    drop(guard);

    assert_eq!(token, "tok-abc123");
    let logs = lines.lock().unwrap().clone();
    assert!(
        logs.iter().any(|line| line.contains("token.fetch.start")),
        "expected fetch start event, got: {:?}",
        logs
    );
    assert!(
        logs.iter()
            .any(|line| line.contains("token.fetch.success") && line.contains("token_len=10")),
        "expected fetch success event, got: {:?}",
        logs
    );
    assert!(
        logs.iter()
            .all(|line| !line.contains(CORP_SECRET) && !line.contains("tok-abc123")),
        "secret material leaked into logs: {:?}",
        logs
    );
}

#[tokio::test]
async fn application_errors_are_logged_as_warnings() {
    let server = MockServer::start().await;
    mount_gettoken(&server, "tok").await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/department/delete"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errcode": 60005,
            "errmsg": "department contains members"
        })))
        .mount(&server)
        .await;

    let (lines, guard) = capture_logs();
    let client = DirectoryClient::new(base_config(&server)).expect("client");
    let err = client.delete_department(1).await.expect_err("should fail");
    drop(guard);

    assert_eq!(err.code(), Some(60005));
    let logs = lines.lock().unwrap().clone();
    assert!(
        logs.iter()
            .any(|line| line.contains("WARN") && line.contains("errcode=60005")),
        "expected warning log with errcode, got: {:?}",
        logs
    );
}

#[test]
fn debug_output_redacts_secret() {
    let config = crate::Config::new("ww1", CORP_SECRET);
    let client = DirectoryClient::new(config).expect("client");
    let rendered = format!("{:?}", client);
    assert!(rendered.contains("ww1"));
    assert!(!rendered.contains(CORP_SECRET));
}
