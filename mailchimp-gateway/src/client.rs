//! MailChimp HTTP client with read caching and error translation.

use crate::{
    config::GatewayConfig,
    credential::Credential,
    error::{GatewayError, GatewayResult},
    options::RequestOptions,
};
use gateway_common::{CacheStore, MemoryCacheStore, ResponseCache, build_http_client};
use regex::Regex;
use reqwest::{Client, Method};
use serde_json::Value;
use std::{
    sync::{Arc, LazyLock},
    time::Duration,
};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Prefix of every cache key written by the client.
pub const CACHE_NAMESPACE: &str = "gateway";

/// Characters allowed in a single path segment. Excludes `:`, `%`, `?`, `#`
/// and `\`, so a path can never carry a scheme, authority, query or
/// encoded separator.
#[allow(clippy::expect_used)]
static PATH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.~-]+$").expect("static regex should not panic"));

/// Authenticated MailChimp client.
///
/// Reads made through [`GatewayClient::fetch`] are cached for the configured
/// TTL. Writes never touch the cache, so a read cached before a write keeps
/// being served until it expires.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    base_url: Url,
    credential: Credential,
    cache: ResponseCache,
    cache_ttl: Duration,
}

impl GatewayClient {
    /// Create a client with an in-memory read cache.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the base URL cannot be
    /// resolved or the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        Self::with_store(config, Arc::new(MemoryCacheStore::new()))
    }

    /// Create a client caching reads in `store`.
    ///
    /// # Errors
    ///
    /// Same as [`GatewayClient::new`].
    pub fn with_store(config: GatewayConfig, store: Arc<dyn CacheStore>) -> GatewayResult<Self> {
        let base_url = config.resolved_base_url()?;
        let http = build_http_client(&config.http).map_err(|e| {
            GatewayError::configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        info!(
            base_url = %base_url,
            datacenter = config.credential.datacenter(),
            cache_ttl_secs = config.cache_ttl.as_secs(),
            "Gateway client ready"
        );

        Ok(Self {
            http,
            base_url,
            credential: config.credential,
            cache: ResponseCache::new(store, CACHE_NAMESPACE),
            cache_ttl: config.cache_ttl,
        })
    }

    /// Base URL request paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Read cache.
    #[must_use]
    pub const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// GET `path` and decode the JSON body, serving repeated reads from cache.
    ///
    /// Entries are keyed by `"gateway-" + path` (query parameters appended
    /// when present), with surrounding `/` stripped. Failures are never cached.
    ///
    /// # Errors
    ///
    /// Returns a 400 [`GatewayError::Upstream`] for a path that is not a
    /// plain relative resource path, and [`GatewayError::Upstream`] on any
    /// transport failure, non-2xx status or undecodable body.
    #[instrument(skip(self, options), fields(path = %path))]
    pub async fn fetch(&self, path: &str, options: RequestOptions) -> GatewayResult<Value> {
        let path = relative_path(path)?;
        let key = options.cache_key(path);
        self.cache
            .get_or_compute(&key, self.cache_ttl, || {
                self.send(Method::GET, path, &options)
            })
            .await
    }

    /// Send a `method` request to `path` without caching.
    ///
    /// An empty response body decodes to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns a 400 [`GatewayError::Upstream`] for a path that is not a
    /// plain relative resource path, and [`GatewayError::Upstream`] on any
    /// transport failure, non-2xx status or undecodable body.
    #[instrument(skip(self, options), fields(method = %method, path = %path))]
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> GatewayResult<Value> {
        self.send(method, path, &options).await
    }

    /// Append the segments of `path` below the base URL.
    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        let path = relative_path(path)?;
        let mut url = self.base_url.clone();

        if !path.is_empty() {
            url.path_segments_mut()
                .map_err(|()| {
                    GatewayError::configuration(format!("Base URL cannot be a base: {}", self.base_url))
                })?
                .pop_if_empty()
                .extend(path.split('/'));
        }

        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> GatewayResult<Value> {
        let url = self.endpoint(path)?;
        let (user, key) = self.credential.basic_auth();

        let mut request = self
            .http
            .request(method.clone(), url)
            .basic_auth(user, Some(key));

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }

        if let Some(body) = &options.body {
            request = request.json(body);
        }

        debug!(%method, path, "Sending upstream request");

        let response = request.send().await.map_err(|e| {
            let err = GatewayError::from(e);
            warn!(%method, path, error = %err, "Upstream unreachable");
            err
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = GatewayError::from_status(status, &String::from_utf8_lossy(&bytes));
            warn!(%method, path, status = status.as_u16(), error = %err, "Upstream request failed");
            return Err(err);
        }

        debug!(%method, path, status = status.as_u16(), bytes = bytes.len(), "Upstream request succeeded");
        decode_body(&bytes)
    }
}

/// Strip surrounding `/` and check every segment is a plain name.
///
/// Absolute URLs, `.`/`..` segments, empty segments, queries and fragments
/// are rejected so requests can never leave the versioned base URL.
fn relative_path(path: &str) -> GatewayResult<&str> {
    let relative = path.trim_matches('/');
    if relative.is_empty() {
        return Ok(relative);
    }

    let valid = relative.split('/').all(|segment| {
        PATH_SEGMENT.is_match(segment) && !segment.chars().all(|c| c == '.')
    });

    if valid {
        Ok(relative)
    } else {
        Err(GatewayError::bad_request(format!("Invalid path: {path:?}")))
    }
}

/// Decode a response body; blank bodies (e.g. `204 No Content`) are `null`.
fn decode_body(bytes: &[u8]) -> GatewayResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_slice(bytes)?)
}
