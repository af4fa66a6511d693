//! MailChimp gateway client.
//!
//! Authenticated access to the MailChimp v3.0 REST API with a short-lived
//! read cache and a single normalized error type.
//!
//! ```no_run
//! use mailchimp_gateway::{GatewayClient, GatewayConfig, RequestOptions};
//!
//! # async fn run() -> mailchimp_gateway::GatewayResult<()> {
//! let client = GatewayClient::new(GatewayConfig::from_env()?)?;
//! let lists = client.fetch("lists", RequestOptions::new()).await?;
//! # let _ = lists;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credential;
pub mod envelope;
pub mod error;
pub mod options;
pub mod resources;

pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use credential::Credential;
pub use envelope::{Envelope, ErrorBody};
pub use error::{ErrorKind, GatewayError, GatewayResult};
pub use options::RequestOptions;
pub use reqwest::Method;
