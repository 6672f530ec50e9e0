//! Configuration management module
//!
//! Loads SDK configuration from environment variables and `.env` files

pub mod settings;

pub use settings::{LoggingConfig, Settings};
