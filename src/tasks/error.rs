use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("timed out reading config from stdin")]
    Timeout,

    #[error("failed to read config payload: {0}")]
    IO(#[from] io::Error),

    #[error("failed to unmarshal config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid checksum on config token")]
    InvalidChecksum,

    #[error("missing checksum on config token")]
    MissingChecksum,
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    Timeout,
    IO,
    Parse,
    Integrity,
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            ConfigError::Timeout => ConfigErrorKind::Timeout,
            ConfigError::IO(_) => ConfigErrorKind::IO,
            ConfigError::Parse(_) => ConfigErrorKind::Parse,
            ConfigError::InvalidChecksum | ConfigError::MissingChecksum => {
                ConfigErrorKind::Integrity
            }
        }
    }
}
