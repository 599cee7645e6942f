//! Example: Read the agent config from stdin with tracing enabled
//!
//! ```sh
//! echo '{"task_agent_path": "/path/to/agent", "max_run_time": 60000000000}' \
//!     | cargo run --example tracing_message --features tracing
//! ```
use std::time::Duration;

use tcrm_agent_config::tasks::tokio::reader::ConfigReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let reader = ConfigReader::new().timeout(Duration::from_secs(5));
    let config = reader.read_from_stdin().await?;
    println!("Config: {:?}", config);
    println!("Command: {}", config.task_agent_cmd());
    Ok(())
}
