//! Shared building blocks for the MailChimp gateway crates.
//!
//! This crate provides centralized implementations for:
//! - HTTP client configuration and building
//! - Time-bounded response caching behind an injectable store
//! - Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod http;
pub mod tracing_config;

pub use cache::{CacheStore, MemoryCacheStore, ResponseCache};
pub use http::{HttpConfig, build_http_client};
pub use tracing_config::{TracingConfig, init_tracing};
