use sha2::{Digest, Sha256};

/// Computes the lowercase hex SHA-256 digest of `token`.
///
/// Payload writers attach this as `token_checksum` so a truncated or corrupted
/// token is rejected instead of being handed to the agent.
///
/// # Examples
/// ```rust
/// use tcrm_agent_config::tasks::checksum::token_checksum;
///
/// assert_eq!(
///     token_checksum("testtoken"),
///     "ada63e98fe50eccb55036d88eda4b2c3709f53c2b65bc0335797067e9a2a5d8b"
/// );
/// ```
pub fn token_checksum(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Case-sensitive comparison of `checksum` against the digest of `token`.
pub fn checksum_matches(token: &str, checksum: &str) -> bool {
    token_checksum(token) == checksum
}
