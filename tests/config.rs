use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use wecom_directory::config::read_config;
use wecom_directory::{Config, ConfigLocation, DirectoryClient, Error};

fn write_config(name: &str, value: serde_json::Value) -> PathBuf {
    let mut cfg_path = PathBuf::from("target");
    fs::create_dir_all(&cfg_path).ok();
    cfg_path.push(name);
    fs::write(&cfg_path, serde_json::to_string(&value).unwrap()).unwrap();
    cfg_path
}

#[test]
fn from_file_reads_credentials_and_overrides() {
    let path = write_config(
        "wecom-config-full.json",
        serde_json::json!({
            "corp_id": "ww1",
            "corp_secret": "secret",
            "base_url": "http://127.0.0.1:9/cgi-bin/",
            "timeout_ms": 1500,
            "token_ttl_secs": 600
        }),
    );
    let cfg = Config::from_file(&path).expect("cfg file");
    assert_eq!(cfg.corp_id, "ww1");
    assert_eq!(cfg.corp_secret, "secret");
    assert_eq!(cfg.base_url, "http://127.0.0.1:9/cgi-bin/");
    assert_eq!(cfg.timeout, Duration::from_millis(1500));
    assert_eq!(cfg.token_ttl, Duration::from_secs(600));
}

#[tokio::test]
async fn read_config_from_file_location() {
    let path = write_config(
        "wecom-config-min.json",
        serde_json::json!({"corp_id": "ww2", "corp_secret": "s"}),
    );
    let cfg = read_config(ConfigLocation::File(path.to_string_lossy().to_string()))
        .await
        .expect("read config");
    assert_eq!(cfg.corp_id, "ww2");
    assert_eq!(cfg.base_url, "https://qyapi.weixin.qq.com/cgi-bin/");
    assert_eq!(cfg.timeout, Duration::from_millis(5000));
    assert_eq!(cfg.token_ttl, Duration::from_secs(7200));
}

#[test]
fn missing_file_is_io_error() {
    let err = Config::from_file("target/does-not-exist.json").expect_err("missing");
    assert!(matches!(err, Error::Io(_)), "got {:?}", err);
}

#[test]
fn invalid_base_url_fails_fast() {
    let cfg = Config::new("ww1", "s").with_base_url("://not-a-valid-url");
    match DirectoryClient::new(cfg) {
        Err(Error::Config(msg)) => assert!(msg.contains("Invalid base URL")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn zero_token_ttl_is_rejected() {
    let cfg = Config::new("ww1", "s").with_token_ttl(Duration::ZERO);
    assert!(matches!(DirectoryClient::new(cfg), Err(Error::Config(_))));
}

#[test]
fn empty_corp_id_is_rejected() {
    let cfg = Config::new("", "s");
    assert!(matches!(DirectoryClient::new(cfg), Err(Error::Config(_))));
}
