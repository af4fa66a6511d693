//! Shared proptest generators.

use proptest::prelude::*;

/// Generate API key bodies (hex, as MailChimp issues them).
pub fn api_key_strategy() -> impl Strategy<Value = String> {
    "[0-9a-f]{32}"
}

/// Generate datacenter identifiers such as `us1` or `us21`.
pub fn datacenter_strategy() -> impl Strategy<Value = String> {
    (1u8..30).prop_map(|n| format!("us{n}"))
}

/// Generate well-formed `{key}-{datacenter}` credentials with their parts.
pub fn credential_strategy() -> impl Strategy<Value = (String, String, String)> {
    (api_key_strategy(), datacenter_strategy())
        .prop_map(|(key, dc)| (format!("{key}-{dc}"), key, dc))
}

/// Generate malformed credentials: no separator, empty halves, or extra segments.
pub fn malformed_credential_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[0-9a-f]{1,32}",
        "[0-9a-f]{1,32}".prop_map(|key| format!("{key}-")),
        datacenter_strategy().prop_map(|dc| format!("-{dc}")),
        ("[0-9a-f]{1,32}", datacenter_strategy(), "[a-z0-9]{1,8}")
            .prop_map(|(key, dc, extra)| format!("{key}-{dc}-{extra}")),
    ]
}

/// Generate list identifiers.
pub fn list_id_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{10}"
}

/// Generate subscriber hashes.
pub fn member_hash_strategy() -> impl Strategy<Value = String> {
    "[0-9a-f]{32}"
}

/// Generate resource paths below the API version prefix.
pub fn resource_path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("lists".to_string()),
        list_id_strategy().prop_map(|id| format!("lists/{id}")),
        list_id_strategy().prop_map(|id| format!("lists/{id}/members")),
        (list_id_strategy(), member_hash_strategy())
            .prop_map(|(id, hash)| format!("lists/{id}/members/{hash}")),
    ]
}

/// Generate HTTP error statuses MailChimp can return.
pub fn error_status_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![
        Just(400u16),
        Just(401),
        Just(403),
        Just(404),
        Just(405),
        Just(414),
        Just(422),
        Just(429),
        Just(500),
        Just(503),
    ]
}
