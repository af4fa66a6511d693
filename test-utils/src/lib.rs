//! Shared test utilities for the MailChimp gateway crates.
//!
//! This crate provides:
//! - Proptest generators for credentials and resource identifiers
//! - A counting cache store double
//! - MailChimp JSON fixtures

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
