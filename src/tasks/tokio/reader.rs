use std::{io, io::Read, thread, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    sync::oneshot,
    time::{Instant, sleep_until},
};

use crate::{
    helper::tracing::MaybeInstrument,
    tasks::{config::AgentConfig, error::ConfigError, validator::ConfigValidator},
};

/// Default upper bound on reading the config payload
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

const READ_CHUNK_SIZE: usize = 8 * 1024;
const MAX_READ_TIMEOUT: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Reads and validates the agent config from a byte stream within a deadline.
///
/// The timeout lives on the reader, so concurrent readers never share it.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use tcrm_agent_config::tasks::tokio::reader::ConfigReader;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let payload = br#"{"task_agent_path": "/opt/agent", "max_run_time": 5000000000}"#;
///     let reader = ConfigReader::new().timeout(Duration::from_secs(1));
///
///     let config = reader.read_from(&payload[..]).await?;
///     assert_eq!(config.max_run_time, Duration::from_secs(5));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigReader {
    /// Read timeout, in milliseconds on the wire
    #[serde(rename = "timeout_ms", with = "duration_ms")]
    pub timeout: Duration,

    /// Reject payloads that carry no token checksum
    pub require_checksum: bool,
}

impl Default for ConfigReader {
    fn default() -> Self {
        ConfigReader {
            timeout: DEFAULT_READ_TIMEOUT,
            require_checksum: false,
        }
    }
}

impl ConfigReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.timeout = Duration::from_millis(timeout);
        self
    }

    pub fn require_checksum(mut self, b: bool) -> Self {
        self.require_checksum = b;
        self
    }

    /// Reads the stream to end-of-data, racing the read against the timeout.
    ///
    /// On timeout the in-flight read is dropped together with any bytes
    /// collected so far.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::Timeout`] if end-of-data is not reached before
    /// the deadline, or [`ConfigError::IO`] if the stream fails.
    pub async fn read_payload<R>(&self, mut reader: R) -> Result<Vec<u8>, ConfigError>
    where
        R: AsyncRead + Unpin,
    {
        let deadline = self.deadline();
        let mut payload = Vec::new();
        let mut chunk = vec![0u8; READ_CHUNK_SIZE];

        loop {
            if Instant::now() >= deadline {
                return Err(Self::timed_out());
            }

            tokio::select! {
                biased;
                () = sleep_until(deadline) => {
                    return Err(Self::timed_out());
                }
                read = reader.read(&mut chunk) => {
                    match read? {
                        0 => break,
                        n => payload.extend_from_slice(&chunk[..n]),
                    }
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(bytes = payload.len(), "Read config payload");

        Ok(payload)
    }

    /// Reads the payload from `reader`, then parses and validates it.
    ///
    /// # Errors
    ///
    /// Returns the first failure of [`ConfigReader::read_payload`] or
    /// [`ConfigValidator::validate`].
    pub async fn read_from<R>(&self, reader: R) -> Result<AgentConfig, ConfigError>
    where
        R: AsyncRead + Unpin,
    {
        async {
            let payload = self.read_payload(reader).await?;
            ConfigValidator::validate(&payload, self.require_checksum)
        }
        .maybe_instrument("read_config")
        .await
    }

    /// Reads a blocking source to end-of-data on a dedicated thread, racing
    /// the result against the timeout.
    ///
    /// The thread is detached rather than run on the tokio blocking pool, so a
    /// timed-out read never holds up runtime shutdown. If the writer keeps the
    /// stream open, the thread lingers until the process exits.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::Timeout`] if end-of-data is not reached before
    /// the deadline, or [`ConfigError::IO`] if the stream fails or the reader
    /// thread cannot be started.
    pub async fn read_payload_blocking<R>(&self, mut reader: R) -> Result<Vec<u8>, ConfigError>
    where
        R: Read + Send + 'static,
    {
        let deadline = self.deadline();
        let (payload_tx, payload_rx) = oneshot::channel::<io::Result<Vec<u8>>>();

        thread::Builder::new()
            .name("config-reader".to_string())
            .spawn(move || {
                let mut payload = Vec::new();
                let result = reader.read_to_end(&mut payload).map(|_| payload);
                // Receiver is gone after a timeout
                let _ = payload_tx.send(result);
            })?;

        if Instant::now() >= deadline {
            return Err(Self::timed_out());
        }

        let payload = tokio::select! {
            biased;
            () = sleep_until(deadline) => {
                return Err(Self::timed_out());
            }
            received = payload_rx => match received {
                Ok(result) => result?,
                Err(_) => {
                    return Err(ConfigError::IO(io::Error::other(
                        "config reader thread exited without a result",
                    )));
                }
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(bytes = payload.len(), "Read config payload");

        Ok(payload)
    }

    /// Reads the payload from a blocking `reader`, then parses and validates it.
    ///
    /// # Errors
    ///
    /// Returns the first failure of [`ConfigReader::read_payload_blocking`] or
    /// [`ConfigValidator::validate`].
    pub async fn read_from_blocking<R>(&self, reader: R) -> Result<AgentConfig, ConfigError>
    where
        R: Read + Send + 'static,
    {
        async {
            let payload = self.read_payload_blocking(reader).await?;
            ConfigValidator::validate(&payload, self.require_checksum)
        }
        .maybe_instrument("read_config")
        .await
    }

    /// Reads the config from the process's stdin.
    ///
    /// Stdin is read on its own thread, so returning from a timeout and then
    /// shutting down the runtime does not wait on a stalled writer.
    ///
    /// # Errors
    ///
    /// See [`ConfigReader::read_from_blocking`].
    pub async fn read_from_stdin(&self) -> Result<AgentConfig, ConfigError> {
        self.read_from_blocking(io::stdin()).await
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.timeout.min(MAX_READ_TIMEOUT)
    }

    fn timed_out() -> ConfigError {
        #[cfg(feature = "tracing")]
        tracing::warn!("Timed out reading config from stdin");
        ConfigError::Timeout
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
