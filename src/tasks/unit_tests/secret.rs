use crate::tasks::secret::Token;

#[test]
fn redacted_formatting() {
    let token = Token::new("testtoken");
    assert_eq!(format!("{token}"), "[REDACTED]");
    assert_eq!(format!("{token:?}"), "[REDACTED]");
}

#[test]
fn expose() {
    let token = Token::from("testtoken");
    assert_eq!(token.expose(), "testtoken");
    assert!(!token.is_empty());
    assert!(Token::default().is_empty());
}

#[test]
fn equality_uses_value() {
    assert_eq!(Token::new("a"), Token::from("a".to_string()));
    assert_ne!(Token::new("a"), Token::new("b"));
    assert_eq!(Token::new("a").clone(), Token::new("a"));
}
