use serde::de::{Error as _, Unexpected};
use serde_json::Value;

use crate::tasks::{
    checksum::checksum_matches,
    config::{AgentConfig, RawAgentConfig},
    error::ConfigError,
    secret::Token,
};

/// Parsing and integrity validation for the agent config payload
pub struct ConfigValidator;

impl ConfigValidator {
    /// Decodes the raw payload bytes.
    ///
    /// # Arguments
    ///
    /// * `payload` - JSON bytes read from stdin.
    ///
    /// # Returns
    ///
    /// - `Ok(RawAgentConfig)` if the payload is a JSON object of the expected shape.
    /// - `Err(ConfigError::Parse)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::Parse`] if:
    /// - The payload is empty or is not valid JSON
    /// - The payload is valid JSON but not an object
    /// - A known field has the wrong type
    ///
    /// # Examples
    /// ```rust
    /// use tcrm_agent_config::tasks::validator::ConfigValidator;
    ///
    /// assert!(ConfigValidator::parse(br#"{"allocation": "a1"}"#).is_ok());
    /// assert!(ConfigValidator::parse(b"not a valid JSON string").is_err());
    /// ```
    pub fn parse(payload: &[u8]) -> Result<RawAgentConfig, ConfigError> {
        let decoded = serde_json::from_slice::<Value>(payload).and_then(|value| {
            if value.is_object() {
                serde_json::from_value(value)
            } else {
                Err(serde_json::Error::invalid_type(
                    Unexpected::Other(json_kind(&value)),
                    &"a JSON object",
                ))
            }
        });

        match decoded {
            Ok(raw) => Ok(raw),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "Failed to unmarshal config");
                Err(ConfigError::Parse(e))
            }
        }
    }

    /// Verifies the token against its supplied checksum.
    ///
    /// An empty checksum skips the check unless `require_checksum` is set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::InvalidChecksum`] if the checksum is non-empty and
    /// does not match the SHA-256 hex digest of the token.
    /// Returns a [`ConfigError::MissingChecksum`] if the checksum is empty and
    /// `require_checksum` is set.
    ///
    /// # Examples
    /// ```rust
    /// use tcrm_agent_config::tasks::{secret::Token, validator::ConfigValidator};
    ///
    /// let token = Token::new("testtoken");
    /// let sum = "ada63e98fe50eccb55036d88eda4b2c3709f53c2b65bc0335797067e9a2a5d8b";
    /// assert!(ConfigValidator::validate_token_checksum(&token, sum, true).is_ok());
    /// assert!(ConfigValidator::validate_token_checksum(&token, "", false).is_ok());
    /// assert!(ConfigValidator::validate_token_checksum(&token, "invalid", false).is_err());
    /// ```
    pub fn validate_token_checksum(
        token: &Token,
        checksum: &str,
        require_checksum: bool,
    ) -> Result<(), ConfigError> {
        if checksum.is_empty() {
            if require_checksum {
                #[cfg(feature = "tracing")]
                tracing::warn!("Config token checksum is required but missing");
                return Err(ConfigError::MissingChecksum);
            }
            #[cfg(feature = "tracing")]
            tracing::debug!("No config token checksum supplied, skipping");
            return Ok(());
        }

        if !checksum_matches(token.expose(), checksum) {
            #[cfg(feature = "tracing")]
            tracing::warn!("Invalid checksum on config token");
            return Err(ConfigError::InvalidChecksum);
        }

        Ok(())
    }

    /// Parses the payload and verifies the token checksum.
    ///
    /// # Errors
    ///
    /// See [`ConfigValidator::parse`] and [`ConfigValidator::validate_token_checksum`].
    pub fn validate(payload: &[u8], require_checksum: bool) -> Result<AgentConfig, ConfigError> {
        let raw = Self::parse(payload)?;
        Self::validate_token_checksum(&raw.token, &raw.token_checksum, require_checksum)?;
        Ok(AgentConfig::from(raw))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
