#[path = "common/mod.rs"]
mod common;

use common::CareQueueTest;

#[test]
fn test_config_show_defaults() {
    let cq = CareQueueTest::new();

    let output = cq.run_success(&["config", "show"]);
    assert!(output.contains("Configuration"));
    assert!(output.contains("http://localhost:8080/openmrs"));
    assert!(output.contains("/openmrs/spa"));
    assert!(output.contains("not configured"));
}

#[test]
fn test_config_show_json() {
    let cq = CareQueueTest::new();
    cq.run_success(&["config", "set", "auth.username", "nurse"]);

    let output = cq.run_success(&["config", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["server"]["spa_base"], "/openmrs/spa");
    assert_eq!(json["auth"]["username"], "nurse");
    assert_eq!(json["auth"]["credentials_configured"], false);
}

#[test]
fn test_config_set_and_get() {
    let cq = CareQueueTest::new();

    cq.run_success(&["config", "set", "server.base_url", "https://emr.example.org/openmrs"]);
    let output = cq.run_success(&["config", "get", "server.base_url"]);
    assert_eq!(output.trim(), "https://emr.example.org/openmrs");

    assert!(cq.read_config().contains("https://emr.example.org/openmrs"));
}

#[test]
fn test_config_password_is_masked() {
    let cq = CareQueueTest::new();

    let output = cq.run_success(&["config", "set", "auth.password", "Admin123"]);
    assert!(!output.contains("Admin123"));

    let output = cq.run_success(&["config", "get", "auth.password"]);
    assert!(output.contains("Ad...23"));
    assert!(!output.contains("Admin123"));

    let output = cq.run_success(&["config", "show"]);
    assert!(!output.contains("Admin123"));
}

#[test]
fn test_config_get_not_set() {
    let cq = CareQueueTest::new();

    let stderr = cq.run_failure(&["config", "get", "auth.username"]);
    assert!(stderr.contains("not set"));
}

#[test]
fn test_config_set_invalid_key() {
    let cq = CareQueueTest::new();

    let stderr = cq.run_failure(&["config", "set", "invalid.key", "value"]);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_set_invalid_url_is_not_saved() {
    let cq = CareQueueTest::new();

    let stderr = cq.run_failure(&["config", "set", "server.base_url", "ftp://emr"]);
    assert!(stderr.contains("unsupported scheme"));
    assert!(!cq.config_path().exists());
}

#[test]
fn test_config_invalid_file_reports_error() {
    let cq = CareQueueTest::new();
    cq.write_config("server: [not, a, mapping]\n");

    let stderr = cq.run_failure(&["config", "show"]);
    assert!(stderr.contains("YAML"));
}
