use std::fmt;

use crate::tasks::config::AgentConfig;

const SUBCOMMAND: &str = "_internal";
const MODE: &str = "agent-runner";

/// Launch command for the task agent.
///
/// Arguments are plain concatenations of the config values; quoting is left
/// to whatever executes the rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAgentCommand {
    agent_dir: String,
    program: String,
    args: Vec<String>,
}

impl TaskAgentCommand {
    pub fn from_config(config: &AgentConfig) -> Self {
        let args = vec![
            SUBCOMMAND.to_string(),
            MODE.to_string(),
            "--verbose".to_string(),
            format!("--runnerAPIBaseURL={}", config.runner_api_base_url),
            format!("--allocation={}", config.allocation),
            "--disableSpinUpStep".to_string(),
            "--disableIsolatedSSHDir".to_string(),
            format!("--maxRunTime={}", config.max_run_time.as_secs()),
            format!("--sshAdvertiseAddr={}", config.ssh_advertise_addr),
        ];

        let command = TaskAgentCommand {
            agent_dir: config.task_agent_dir(),
            program: config.task_agent_path.clone(),
            args,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(command = %command, "Rendered task agent command");

        command
    }

    /// `PATH` assignment that appends the agent directory to the inherited search path
    pub fn path_env(&self) -> String {
        format!("PATH=$PATH:{}", self.agent_dir)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for TaskAgentCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path_env(), self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
