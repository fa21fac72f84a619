//! API key types.
//!
//! Keys gate access to the service. The `uid` of a key, not the key value
//! itself, is what tenant tokens are bound to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API key record as returned by the `/keys` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    /// Stable identifier of the key. Tenant tokens reference this value.
    pub uid: Uuid,
    /// The key value to present in the `Authorization` header.
    pub key: String,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Actions the key may perform, e.g. `search` or `documents.add`.
    pub actions: Vec<String>,
    /// Indexes the key may touch, `["*"]` for all.
    pub indexes: Vec<String>,
    /// When the key stops working. `None` means it never expires.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// When the key was created.
    pub created_at: DateTime<Utc>,
    /// When the key was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Page of keys returned by `GET /keys`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysResults {
    /// Keys in this page.
    pub results: Vec<Key>,
    /// Offset that was applied.
    pub offset: u32,
    /// Page size that was applied.
    pub limit: u32,
    /// Total number of keys.
    pub total: u64,
}

/// Pagination options for `GET /keys`.
#[derive(Debug, Clone, Default)]
pub struct KeysQuery {
    /// Number of keys to skip.
    pub offset: Option<u32>,
    /// Maximum number of keys to return.
    pub limit: Option<u32>,
}

impl KeysQuery {
    /// Create a query with the service default pagination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip this many keys.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limit the number of keys returned.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the pagination as query parameters.
    pub fn as_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Body of `POST /keys`.
///
/// The service requires `actions`, `indexes` and `expiresAt`. An explicit
/// `null` expiry creates a key that never expires, so the field is always
/// serialized.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyBuilder {
    /// Pre-chosen uid for the key. Omitted to let the service pick one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,
    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Actions the key may perform.
    pub actions: Vec<String>,
    /// Indexes the key may touch.
    pub indexes: Vec<String>,
    /// When the key stops working, `None` for never.
    pub expires_at: Option<DateTime<Utc>>,
}

impl KeyBuilder {
    /// Create a builder with no actions, no indexes and no expiry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this uid instead of a service-generated one.
    pub fn with_uid(mut self, uid: Uuid) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Allow these actions.
    pub fn with_actions<S: Into<String>>(mut self, actions: impl IntoIterator<Item = S>) -> Self {
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    /// Allow these indexes.
    pub fn with_indexes<S: Into<String>>(mut self, indexes: impl IntoIterator<Item = S>) -> Self {
        self.indexes = indexes.into_iter().map(Into::into).collect();
        self
    }

    /// Expire the key at this instant.
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Body of `PATCH /keys/{key}`. Only the name and description of an
/// existing key can change.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
