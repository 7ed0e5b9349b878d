#![allow(dead_code)]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wecom_directory::{Config, DirectoryClient};

pub const CORP_ID: &str = "ww0123456789";
pub const CORP_SECRET: &str = "corp-secret";
pub const TOKEN: &str = "ACCESS_TOKEN";

pub fn config(server: &MockServer) -> Config {
    Config::new(CORP_ID, CORP_SECRET)
        .with_base_url(format!("{}/cgi-bin", server.uri()))
        .with_timeout(Duration::from_secs(2))
}

pub fn client(server: &MockServer) -> DirectoryClient {
    DirectoryClient::new(config(server)).expect("client")
}

pub fn token_body(token: &str) -> serde_json::Value {
    json!({
        "errcode": 0,
        "errmsg": "ok",
        "access_token": token,
        "expires_in": 7200
    })
}

/// gettoken mock that only matches the test credentials.
pub async fn mount_gettoken(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .and(query_param("corpid", CORP_ID))
        .and(query_param("corpsecret", CORP_SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(TOKEN)))
        .mount(server)
        .await;
}

pub fn ok_body() -> serde_json::Value {
    json!({"errcode": 0, "errmsg": "ok"})
}
