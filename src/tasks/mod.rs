pub mod checksum;
pub mod command;
pub mod config;
pub mod error;
pub mod secret;
pub mod tokio;
pub mod validator;
