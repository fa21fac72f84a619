//! Document retrieval types.

use serde::{Deserialize, Serialize};

/// Options for `GET /indexes/{uid}/documents`.
#[derive(Debug, Clone, Default)]
pub struct DocumentsQuery {
    /// Number of documents to skip.
    pub offset: Option<u32>,
    /// Maximum number of documents to return.
    pub limit: Option<u32>,
    /// Restrict the returned attributes to this set.
    pub fields: Option<Vec<String>>,
}

impl DocumentsQuery {
    /// Create a query with the service default pagination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip this many documents.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limit the number of documents returned.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only return these attributes.
    pub fn with_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Render the options as query parameters.
    pub fn as_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(fields) = &self.fields {
            pairs.push(("fields".to_string(), fields.join(",")));
        }
        pairs
    }
}

/// Page of documents returned by `GET /indexes/{uid}/documents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResults<T> {
    /// Documents in this page.
    pub results: Vec<T>,
    /// Offset that was applied.
    pub offset: u32,
    /// Page size that was applied.
    pub limit: u32,
    /// Total number of documents in the index.
    pub total: u64,
}
