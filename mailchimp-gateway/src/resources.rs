//! Typed access to the audience lists and list members resources.
//!
//! Path identifiers are checked before anything is sent upstream; request
//! bodies are forwarded unchanged.

use crate::{
    client::GatewayClient,
    error::{GatewayError, GatewayResult},
    options::RequestOptions,
};
use regex::Regex;
use reqwest::Method;
use serde_json::Value;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static LIST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("static regex should not panic"));

#[allow(clippy::expect_used)]
static MEMBER_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+$").expect("static regex should not panic"));

fn check_list_id(list_id: &str) -> GatewayResult<&str> {
    if LIST_ID.is_match(list_id) {
        Ok(list_id)
    } else {
        Err(GatewayError::bad_request(format!("Invalid list id: {list_id:?}")))
    }
}

fn check_member_hash(hash: &str) -> GatewayResult<&str> {
    if MEMBER_HASH.is_match(hash) {
        Ok(hash)
    } else {
        Err(GatewayError::bad_request(format!("Invalid member hash: {hash:?}")))
    }
}

impl GatewayClient {
    /// Audience lists.
    #[must_use]
    pub const fn lists(&self) -> Lists<'_> {
        Lists { client: self }
    }

    /// Members of audience lists.
    #[must_use]
    pub const fn members(&self) -> Members<'_> {
        Members { client: self }
    }
}

/// `lists` resource.
#[derive(Debug, Clone, Copy)]
pub struct Lists<'a> {
    client: &'a GatewayClient,
}

impl Lists<'_> {
    /// Get information about all lists. Cached.
    ///
    /// # Errors
    ///
    /// Propagates any [`GatewayError`] from the upstream call.
    pub async fn index(&self) -> GatewayResult<Value> {
        self.client.fetch("lists", RequestOptions::new()).await
    }

    /// Get a single list. Cached.
    ///
    /// # Errors
    ///
    /// Returns a 400 error for an invalid id, otherwise propagates upstream failures.
    pub async fn show(&self, list_id: &str) -> GatewayResult<Value> {
        let list_id = check_list_id(list_id)?;
        self.client
            .fetch(&format!("lists/{list_id}"), RequestOptions::new())
            .await
    }

    /// Create a list.
    ///
    /// # Errors
    ///
    /// Propagates any [`GatewayError`] from the upstream call.
    pub async fn create(&self, body: Value) -> GatewayResult<Value> {
        self.client
            .call(Method::POST, "lists", RequestOptions::new().with_body(body))
            .await
    }

    /// Update a list.
    ///
    /// # Errors
    ///
    /// Returns a 400 error for an invalid id, otherwise propagates upstream failures.
    pub async fn update(&self, list_id: &str, body: Value) -> GatewayResult<Value> {
        let list_id = check_list_id(list_id)?;
        self.client
            .call(
                Method::PATCH,
                &format!("lists/{list_id}"),
                RequestOptions::new().with_body(body),
            )
            .await
    }

    /// Delete a list.
    ///
    /// # Errors
    ///
    /// Returns a 400 error for an invalid id, otherwise propagates upstream failures.
    pub async fn delete(&self, list_id: &str) -> GatewayResult<()> {
        let list_id = check_list_id(list_id)?;
        self.client
            .call(Method::DELETE, &format!("lists/{list_id}"), RequestOptions::new())
            .await?;
        Ok(())
    }
}

/// `lists/{list_id}/members` resource.
///
/// Members are addressed by their subscriber hash, the lowercase hex MD5 of
/// the lowercased email address.
#[derive(Debug, Clone, Copy)]
pub struct Members<'a> {
    client: &'a GatewayClient,
}

impl Members<'_> {
    /// Get the members of a list. Cached.
    ///
    /// # Errors
    ///
    /// Returns a 400 error for an invalid id, otherwise propagates upstream failures.
    pub async fn index(&self, list_id: &str) -> GatewayResult<Value> {
        let list_id = check_list_id(list_id)?;
        self.client
            .fetch(&format!("lists/{list_id}/members"), RequestOptions::new())
            .await
    }

    /// Get a single member. Cached.
    ///
    /// # Errors
    ///
    /// Returns a 400 error for an invalid id or hash, otherwise propagates
    /// upstream failures.
    pub async fn show(&self, list_id: &str, hash: &str) -> GatewayResult<Value> {
        let path = member_path(list_id, hash)?;
        self.client.fetch(&path, RequestOptions::new()).await
    }

    /// Add a member to a list.
    ///
    /// # Errors
    ///
    /// Returns a 400 error for an invalid id, otherwise propagates upstream failures.
    pub async fn create(&self, list_id: &str, body: Value) -> GatewayResult<Value> {
        let list_id = check_list_id(list_id)?;
        self.client
            .call(
                Method::POST,
                &format!("lists/{list_id}/members"),
                RequestOptions::new().with_body(body),
            )
            .await
    }

    /// Update a member.
    ///
    /// # Errors
    ///
    /// Returns a 400 error for an invalid id or hash, otherwise propagates
    /// upstream failures.
    pub async fn update(&self, list_id: &str, hash: &str, body: Value) -> GatewayResult<Value> {
        let path = member_path(list_id, hash)?;
        self.client
            .call(Method::PATCH, &path, RequestOptions::new().with_body(body))
            .await
    }

    /// Remove a member from a list.
    ///
    /// # Errors
    ///
    /// Returns a 400 error for an invalid id or hash, otherwise propagates
    /// upstream failures.
    pub async fn delete(&self, list_id: &str, hash: &str) -> GatewayResult<()> {
        let path = member_path(list_id, hash)?;
        self.client
            .call(Method::DELETE, &path, RequestOptions::new())
            .await?;
        Ok(())
    }
}

fn member_path(list_id: &str, hash: &str) -> GatewayResult<String> {
    let list_id = check_list_id(list_id)?;
    let hash = check_member_hash(hash)?;
    Ok(format!("lists/{list_id}/members/{hash}"))
}
