//! Index metadata types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Index record as returned by `GET /indexes/{uid}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    /// Unique name of the index.
    pub uid: String,
    /// Attribute used as the document identifier. `None` until the service
    /// has inferred it from the first documents or it was set explicitly.
    #[serde(default)]
    pub primary_key: Option<String>,
    /// When the index was created.
    pub created_at: DateTime<Utc>,
    /// When the index was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Page of indexes returned by `GET /indexes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexesResults {
    /// Indexes in this page, sorted by uid.
    pub results: Vec<IndexMetadata>,
    /// Offset that was applied.
    pub offset: u32,
    /// Page size that was applied.
    pub limit: u32,
    /// Total number of indexes.
    pub total: u64,
}

/// Pagination options for `GET /indexes`.
#[derive(Debug, Clone, Default)]
pub struct IndexesQuery {
    /// Number of indexes to skip.
    pub offset: Option<u32>,
    /// Maximum number of indexes to return.
    pub limit: Option<u32>,
}

impl IndexesQuery {
    /// Create a query with the service default pagination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip this many indexes.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limit the number of indexes returned.
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

/// One swap entry for `POST /swap-indexes`.
///
/// The two named indexes exchange their documents, settings and tasks
/// atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSwap {
    /// The pair of index uids to swap.
    pub indexes: (String, String),
}

impl IndexSwap {
    /// Swap `a` with `b`.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            indexes: (a.into(), b.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_index_metadata() {
        let raw = r#"{
            "uid": "movies",
            "primaryKey": "id",
            "createdAt": "2026-08-20T09:29:45.175Z",
            "updatedAt": "2026-08-21T10:00:00.000Z"
        }"#;

        let index: IndexMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(index.uid, "movies");
        assert_eq!(index.primary_key.as_deref(), Some("id"));
    }

    #[test]
    fn null_primary_key_is_none() {
        let raw = r#"{
            "uid": "books",
            "primaryKey": null,
            "createdAt": "2026-08-20T09:29:45.175Z",
            "updatedAt": "2026-08-20T09:29:45.175Z"
        }"#;

        let index: IndexMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(index.primary_key, None);
    }

    #[test]
    fn swap_serializes_as_pair_array() {
        let swap = IndexSwap::new("movies", "movies_new");
        let value = serde_json::to_value(&swap).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "indexes": ["movies", "movies_new"] })
        );
    }
}
