//! # tcrm-agent-config
//!
//! Config ingestion for short-lived TCRM task workers.
//! A worker receives one JSON payload on stdin, verifies it, and renders the
//! command line that launches the task agent.
//!
//! ## Features
//!
//! - **Bounded Reads**: The payload is read within a per-reader deadline, even if the writer stalls
//! - **Token Integrity**: Optional SHA-256 checksum over the secret token
//! - **Redacted Secrets**: The token never shows up in `Debug`, `Display` or logs
//! - **Deterministic Commands**: Fixed flag order for the task agent launch line
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use tcrm_agent_config::tasks::tokio::reader::ConfigReader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let payload = br#"{
//!         "token": "testtoken",
//!         "token_checksum": "ada63e98fe50eccb55036d88eda4b2c3709f53c2b65bc0335797067e9a2a5d8b",
//!         "task_agent_path": "/path/to/agent",
//!         "runner_api_base_url": "https://example.com/api",
//!         "allocation": "testallocation",
//!         "ssh_advertise_addr": "192.168.1.1",
//!         "max_run_time": 3600000000000
//!     }"#;
//!
//!     // Production workers call `read_from_stdin` instead
//!     let config = ConfigReader::new()
//!         .timeout(Duration::from_secs(5))
//!         .read_from(&payload[..])
//!         .await?;
//!
//!     assert_eq!(
//!         config.task_agent_cmd(),
//!         "PATH=$PATH:/path/to /path/to/agent _internal agent-runner --verbose \
//!          --runnerAPIBaseURL=https://example.com/api --allocation=testallocation \
//!          --disableSpinUpStep --disableIsolatedSSHDir --maxRunTime=3600 \
//!          --sshAdvertiseAddr=192.168.1.1"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `tracing`: Enable structured logging integration

pub mod helper;
pub mod tasks;
