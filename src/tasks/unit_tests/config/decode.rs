use std::time::Duration;

use crate::tasks::{
    config::{AgentConfig, RawAgentConfig},
    secret::Token,
};

#[test]
fn all_fields() {
    let raw: RawAgentConfig = serde_json::from_str(
        r#"{
            "entrypoint": ["a", "b"],
            "token": "testtoken",
            "token_checksum": "abc",
            "task_agent_path": "/path/to/agent",
            "runner_api_base_url": "https://example.com/api",
            "allocation": "testallocation",
            "ssh_advertise_addr": "192.168.1.1",
            "max_run_time": 60000000000
        }"#,
    )
    .unwrap();

    assert_eq!(raw.token_checksum, "abc");
    assert_eq!(raw.max_run_time, 60_000_000_000);

    let config = AgentConfig::from(raw);
    assert_eq!(config.entrypoint, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(config.token, Token::new("testtoken"));
    assert_eq!(config.task_agent_path, "/path/to/agent");
    assert_eq!(config.runner_api_base_url, "https://example.com/api");
    assert_eq!(config.allocation, "testallocation");
    assert_eq!(config.ssh_advertise_addr, "192.168.1.1");
    assert_eq!(config.max_run_time, Duration::from_secs(60));
}

#[test]
fn missing_fields_are_zero() {
    let raw: RawAgentConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(raw.token_checksum, "");
    assert_eq!(AgentConfig::from(raw), AgentConfig::default());
}

#[test]
fn null_fields_are_zero() {
    let raw: RawAgentConfig = serde_json::from_str(
        r#"{"entrypoint": null, "token": null, "token_checksum": null, "allocation": null, "max_run_time": null}"#,
    )
    .unwrap();
    assert!(raw.entrypoint.is_empty());
    assert!(raw.token.is_empty());
    assert_eq!(raw.token_checksum, "");
    assert_eq!(raw.allocation, "");
    assert_eq!(raw.max_run_time, 0);
}

#[test]
fn unknown_fields_ignored() {
    let raw: RawAgentConfig =
        serde_json::from_str(r#"{"allocation": "a1", "something_new": {"x": 1}}"#).unwrap();
    assert_eq!(raw.allocation, "a1");
}

#[test]
fn entrypoint_order_preserved() {
    let raw: RawAgentConfig =
        serde_json::from_str(r#"{"entrypoint": ["z", "a", "m", "a"]}"#).unwrap();
    assert_eq!(raw.entrypoint, vec!["z", "a", "m", "a"]);
}

#[test]
fn wrong_types_rejected() {
    assert!(serde_json::from_str::<RawAgentConfig>(r#"{"entrypoint": "not a list"}"#).is_err());
    assert!(serde_json::from_str::<RawAgentConfig>(r#"{"max_run_time": "60s"}"#).is_err());
    assert!(serde_json::from_str::<RawAgentConfig>(r#"{"token": 12}"#).is_err());
}

#[test]
fn negative_max_run_time_clamps_to_zero() {
    let raw: RawAgentConfig = serde_json::from_str(r#"{"max_run_time": -5000000000}"#).unwrap();
    assert_eq!(raw.max_run_time, -5_000_000_000);

    let config = AgentConfig::from(raw);
    assert_eq!(config.max_run_time, Duration::ZERO);
    assert!(config.task_agent_cmd().contains("--maxRunTime=0 "));
}

#[test]
fn max_run_time_out_of_range_rejected() {
    assert!(
        serde_json::from_str::<RawAgentConfig>(r#"{"max_run_time": 9223372036854775808}"#)
            .is_err()
    );
}
