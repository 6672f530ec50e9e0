//! Service layer module
//!
//! Contains the HTTP transport shared by every resource

pub mod client;

pub use client::{HttpClient, RequestOptions, RetryConfig};
