//! Gateway client configuration.

use crate::credential::{Credential, DEFAULT_UPSTREAM_DOMAIN};
use crate::error::{GatewayError, GatewayResult};
use gateway_common::HttpConfig;
use std::time::Duration;
use url::Url;

/// Environment variable holding the `{key}-{datacenter}` credential.
pub const ENV_API_KEY: &str = "MAILCHIMP_KEY";
/// Environment variable overriding the upstream base URL.
pub const ENV_BASE_URL: &str = "MAILCHIMP_BASE_URL";
/// Environment variable for the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "MAILCHIMP_TIMEOUT_SECS";
/// Environment variable for the read cache TTL, in seconds.
pub const ENV_CACHE_TTL_SECS: &str = "MAILCHIMP_CACHE_TTL_SECS";

/// How long a successful read stays cached.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);

/// Gateway client configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Resolved API credential
    pub credential: Credential,
    /// Upstream API domain, prefixed with the datacenter
    pub upstream_domain: String,
    /// Explicit base URL, bypassing datacenter resolution
    pub base_url: Option<Url>,
    /// Transport settings
    pub http: HttpConfig,
    /// Read cache TTL
    pub cache_ttl: Duration,
}

impl GatewayConfig {
    /// Create a configuration from a composite `{key}-{datacenter}` credential.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the credential is malformed.
    pub fn new(api_key: &str) -> GatewayResult<Self> {
        Ok(Self {
            credential: Credential::parse(api_key)?,
            upstream_domain: DEFAULT_UPSTREAM_DOMAIN.to_string(),
            base_url: None,
            http: HttpConfig::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
        })
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if `MAILCHIMP_KEY` is missing
    /// or any variable is malformed.
    pub fn from_env() -> GatewayResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`GatewayConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .ok_or_else(|| GatewayError::configuration("API key is required"))?;
        let mut config = Self::new(&api_key)?;

        if let Some(raw) = lookup(ENV_BASE_URL) {
            let url = Url::parse(&raw).map_err(|e| {
                GatewayError::configuration(format!("Invalid {ENV_BASE_URL}: {e}"))
            })?;
            config = config.with_base_url(url);
        }

        if let Some(timeout) = parse_secs(&lookup, ENV_TIMEOUT_SECS)? {
            config = config.with_timeout(timeout);
        }

        if let Some(ttl) = parse_secs(&lookup, ENV_CACHE_TTL_SECS)? {
            config = config.with_cache_ttl(ttl);
        }

        Ok(config)
    }

    /// Send requests to `url` instead of the datacenter host.
    #[must_use]
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the upstream domain.
    #[must_use]
    pub fn with_upstream_domain(mut self, domain: impl Into<String>) -> Self {
        self.upstream_domain = domain.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Set the transport settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Set the read cache TTL.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Base URL every request path is joined to. Always ends with `/`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if no valid URL can be formed.
    pub fn resolved_base_url(&self) -> GatewayResult<Url> {
        let Some(url) = &self.base_url else {
            return self.credential.base_url(&self.upstream_domain);
        };

        if url.cannot_be_a_base() {
            return Err(GatewayError::configuration(format!(
                "Base URL cannot be a base: {url}"
            )));
        }

        let mut url = url.clone();
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

fn parse_secs<F>(lookup: &F, name: &str) -> GatewayResult<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| GatewayError::configuration(format!("Invalid {name}: {e}")))
        })
        .transpose()
}
