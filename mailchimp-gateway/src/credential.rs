//! MailChimp API credential resolution.
//!
//! MailChimp API keys carry their datacenter as a suffix (`{key}-{dc}`);
//! the datacenter selects the regional API host.

use crate::error::{GatewayError, GatewayResult};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Default upstream API domain.
pub const DEFAULT_UPSTREAM_DOMAIN: &str = "api.mailchimp.com";

/// Username MailChimp expects for HTTP Basic authentication.
pub const BASIC_AUTH_USER: &str = "apikey";

/// API version path prefix.
const API_VERSION_PATH: &str = "3.0/";

/// Resolved MailChimp credential.
#[derive(Clone)]
pub struct Credential {
    api_key: SecretString,
    datacenter: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"[REDACTED]")
            .field("datacenter", &self.datacenter)
            .finish()
    }
}

impl Credential {
    /// Parse a composite `{key}-{datacenter}` credential.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the value is empty or does
    /// not split on `-` into exactly two non-empty segments.
    pub fn parse(raw: &str) -> GatewayResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(GatewayError::configuration("API key is required"));
        }

        let mut segments = raw.split('-');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(key), Some(datacenter), None) if !key.is_empty() && !datacenter.is_empty() => {
                Ok(Self {
                    api_key: SecretString::from(key.to_string()),
                    datacenter: datacenter.to_string(),
                })
            }
            _ => Err(GatewayError::configuration(
                "API key must have the form {key}-{datacenter}",
            )),
        }
    }

    /// Datacenter suffix, e.g. `us1`.
    #[must_use]
    pub fn datacenter(&self) -> &str {
        &self.datacenter
    }

    /// API key, for building the Basic auth header.
    #[must_use]
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// Basic auth pair `("apikey", key)`.
    #[must_use]
    pub fn basic_auth(&self) -> (&'static str, &str) {
        (BASIC_AUTH_USER, self.api_key.expose_secret())
    }

    /// Versioned base URL, `https://{datacenter}.{domain}/3.0/`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the datacenter or domain
    /// does not form a valid host.
    pub fn base_url(&self, upstream_domain: &str) -> GatewayResult<Url> {
        let raw = format!("https://{}.{upstream_domain}/{API_VERSION_PATH}", self.datacenter);
        Url::parse(&raw)
            .map_err(|e| GatewayError::configuration(format!("Invalid base URL {raw}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_valid() {
        let credential = Credential::parse("abc-us1").unwrap();
        assert_eq!(credential.api_key().expose_secret(), "abc");
        assert_eq!(credential.datacenter(), "us1");
        assert_eq!(credential.basic_auth(), ("apikey", "abc"));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let credential = Credential::parse("  abc-us6\n").unwrap();
        assert_eq!(credential.datacenter(), "us6");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "   ", "abc", "-us1", "abc-", "-", "abc-us1-extra"] {
            let err = Credential::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "input {raw:?}");
        }
    }

    #[test]
    fn test_base_url() {
        let credential = Credential::parse("abc-us1").unwrap();
        let url = credential.base_url(DEFAULT_UPSTREAM_DOMAIN).unwrap();
        assert_eq!(url.as_str(), "https://us1.api.mailchimp.com/3.0/");
    }

    #[test]
    fn test_debug_redacts_key() {
        let credential = Credential::parse("supersecret0123-us2").unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("supersecret0123"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("us2"));
    }
}
