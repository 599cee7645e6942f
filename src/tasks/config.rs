use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::tasks::{command::TaskAgentCommand, secret::Token};

/// Validated configuration for one task agent invocation.
///
/// Built once by [`ConfigReader`](crate::tasks::tokio::reader::ConfigReader)
/// and treated as read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentConfig {
    /// Program arguments supplied by the caller, in order
    pub entrypoint: Vec<String>,

    /// Access token for the runner API
    pub token: Token,

    /// Path to the task agent executable
    pub task_agent_path: String,

    /// Runner API base URL, forwarded verbatim
    pub runner_api_base_url: String,

    /// Allocation identifier, forwarded verbatim
    pub allocation: String,

    /// Address the agent advertises for SSH reruns, forwarded verbatim
    pub ssh_advertise_addr: String,

    /// Maximum allowed runtime of the task
    pub max_run_time: Duration,
}

impl AgentConfig {
    pub fn new(task_agent_path: impl Into<String>) -> Self {
        AgentConfig {
            task_agent_path: task_agent_path.into(),
            ..Default::default()
        }
    }

    pub fn entrypoint<I, S>(mut self, entrypoint: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entrypoint = entrypoint.into_iter().map(Into::into).collect();
        self
    }

    pub fn token(mut self, token: impl Into<Token>) -> Self {
        self.token = token.into();
        self
    }

    pub fn runner_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.runner_api_base_url = url.into();
        self
    }

    pub fn allocation(mut self, allocation: impl Into<String>) -> Self {
        self.allocation = allocation.into();
        self
    }

    pub fn ssh_advertise_addr(mut self, addr: impl Into<String>) -> Self {
        self.ssh_advertise_addr = addr.into();
        self
    }

    pub fn max_run_time(mut self, max_run_time: Duration) -> Self {
        self.max_run_time = max_run_time;
        self
    }

    /// Directory containing the task agent executable.
    ///
    /// A bare file name resolves to `.`.
    pub fn task_agent_dir(&self) -> String {
        match Path::new(&self.task_agent_path).parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().into_owned(),
            _ => ".".to_string(),
        }
    }

    pub fn task_agent_command(&self) -> TaskAgentCommand {
        TaskAgentCommand::from_config(self)
    }

    /// Renders the shell command line that launches the task agent.
    ///
    /// # Examples
    /// ```rust
    /// use std::time::Duration;
    /// use tcrm_agent_config::tasks::config::AgentConfig;
    ///
    /// let config = AgentConfig::new("/opt/agent/bin/agent")
    ///     .allocation("alloc-1")
    ///     .max_run_time(Duration::from_secs(90));
    /// let cmd = config.task_agent_cmd();
    /// assert!(cmd.starts_with("PATH=$PATH:/opt/agent/bin /opt/agent/bin/agent _internal agent-runner"));
    /// assert!(cmd.contains("--maxRunTime=90"));
    /// ```
    pub fn task_agent_cmd(&self) -> String {
        self.task_agent_command().to_string()
    }
}

/// Wire shape of the stdin payload.
///
/// Missing fields decode to their zero value and unknown fields are ignored.
/// `token_checksum` only lives here; it is dropped once the token is verified.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAgentConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub entrypoint: Vec<String>,
    pub token: Token,
    #[serde(deserialize_with = "null_as_default")]
    pub token_checksum: String,
    #[serde(deserialize_with = "null_as_default")]
    pub task_agent_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub runner_api_base_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub allocation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ssh_advertise_addr: String,
    /// Signed nanoseconds; negative values clamp to zero
    #[serde(deserialize_with = "null_as_default")]
    pub max_run_time: i64,
}

impl From<RawAgentConfig> for AgentConfig {
    fn from(raw: RawAgentConfig) -> Self {
        AgentConfig {
            entrypoint: raw.entrypoint,
            token: raw.token,
            task_agent_path: raw.task_agent_path,
            runner_api_base_url: raw.runner_api_base_url,
            allocation: raw.allocation,
            ssh_advertise_addr: raw.ssh_advertise_addr,
            max_run_time: Duration::from_nanos(u64::try_from(raw.max_run_time).unwrap_or_default()),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
