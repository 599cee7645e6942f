use crate::tasks::{
    checksum::{checksum_matches, token_checksum},
    error::{ConfigError, ConfigErrorKind},
    secret::Token,
    validator::ConfigValidator,
};

const TESTTOKEN_SUM: &str = "ada63e98fe50eccb55036d88eda4b2c3709f53c2b65bc0335797067e9a2a5d8b";

#[test]
fn sha256_hex() {
    assert_eq!(token_checksum("testtoken"), TESTTOKEN_SUM);
    assert_eq!(
        token_checksum(""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn comparison_is_case_sensitive() {
    assert!(checksum_matches("testtoken", TESTTOKEN_SUM));
    assert!(!checksum_matches(
        "testtoken",
        &TESTTOKEN_SUM.to_uppercase()
    ));
}

#[test]
fn matching_checksum_accepted() {
    let token = Token::new("testtoken");
    assert!(ConfigValidator::validate_token_checksum(&token, TESTTOKEN_SUM, false).is_ok());
    assert!(ConfigValidator::validate_token_checksum(&token, TESTTOKEN_SUM, true).is_ok());
}

#[test]
fn mismatched_checksum_rejected() {
    let token = Token::new("tasktoken");
    let err = ConfigValidator::validate_token_checksum(&token, "invalid", false).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidChecksum));
    assert_eq!(err.kind(), ConfigErrorKind::Integrity);
    assert!(err.to_string().contains("invalid checksum on config token"));
}

#[test]
fn truncated_token_rejected() {
    let token = Token::new("testtoke");
    assert!(matches!(
        ConfigValidator::validate_token_checksum(&token, TESTTOKEN_SUM, false),
        Err(ConfigError::InvalidChecksum)
    ));
}

#[test]
fn missing_checksum_skipped_by_default() {
    let token = Token::new("testtoken");
    assert!(ConfigValidator::validate_token_checksum(&token, "", false).is_ok());
}

#[test]
fn missing_checksum_rejected_when_required() {
    let token = Token::new("testtoken");
    let err = ConfigValidator::validate_token_checksum(&token, "", true).unwrap_err();
    assert!(matches!(err, ConfigError::MissingChecksum));
    assert_eq!(err.kind(), ConfigErrorKind::Integrity);
}

#[test]
fn error_does_not_leak_material() {
    let token = Token::new("tasktoken");
    let err = ConfigValidator::validate_token_checksum(&token, "deadbeef", false).unwrap_err();
    let msg = err.to_string();
    assert!(!msg.contains("tasktoken"));
    assert!(!msg.contains("deadbeef"));
    assert!(!msg.contains(&token_checksum("tasktoken")));
}
