//! Property-based tests for the gateway client.
//!
//! Tests validate:
//! - Credential parsing accepts exactly `{key}-{datacenter}`
//! - Credentials never leak through `Debug`
//! - Upstream status codes survive error translation

use mailchimp_gateway::{Credential, ErrorBody, ErrorKind, GatewayConfig, GatewayError};
use proptest::prelude::*;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use test_utils::{
    credential_strategy, error_status_strategy, fixtures, malformed_credential_strategy,
    resource_path_strategy,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* well-formed credential, parsing yields its key and datacenter
    /// and the base URL targets that datacenter.
    #[test]
    fn prop_valid_credentials_resolve((raw, key, dc) in credential_strategy()) {
        let credential = Credential::parse(&raw).unwrap();

        prop_assert_eq!(credential.api_key().expose_secret(), key.as_str());
        prop_assert_eq!(credential.datacenter(), dc.as_str());

        let config = GatewayConfig::new(&raw).unwrap();
        let url = config.resolved_base_url().unwrap();
        prop_assert_eq!(url.as_str(), format!("https://{dc}.api.mailchimp.com/3.0/"));
    }

    /// *For any* malformed credential, construction fails with a configuration error.
    #[test]
    fn prop_malformed_credentials_rejected(raw in malformed_credential_strategy()) {
        let err = Credential::parse(&raw).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    /// *For any* credential, the Debug output never contains the API key.
    #[test]
    fn prop_key_not_exposed_in_debug((raw, key, _dc) in credential_strategy()) {
        let config = GatewayConfig::new(&raw).unwrap();
        let debug_output = format!("{config:?}");

        prop_assert!(
            !debug_output.contains(&key),
            "Debug output should not contain the API key"
        );
        prop_assert!(debug_output.contains("[REDACTED]"));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* upstream error status, the translated error and response
    /// body carry that exact status.
    #[test]
    fn prop_upstream_status_preserved(
        status in error_status_strategy(),
        title in "[A-Za-z ]{1,30}",
        path in resource_path_strategy(),
    ) {
        let status_code = StatusCode::from_u16(status).unwrap();
        let body = fixtures::problem(status, &title, &format!("{path} failed"));

        let err = GatewayError::from_status(status_code, &body.to_string());

        prop_assert_eq!(err.kind(), ErrorKind::Gateway);
        prop_assert_eq!(err.status_code(), status);
        prop_assert!(err.message().starts_with(&title));
        prop_assert_eq!(ErrorBody::from(&err).http_status(), status_code);
    }

    /// *For any* non-JSON error body, the status is preserved and the
    /// message quotes the body.
    #[test]
    fn prop_plain_bodies_quoted(
        status in error_status_strategy(),
        text in "[a-z]{1,40}",
    ) {
        let status_code = StatusCode::from_u16(status).unwrap();
        let err = GatewayError::from_status(status_code, &text);

        prop_assert_eq!(err.status_code(), status);
        prop_assert!(err.message().ends_with(&text));
    }
}
