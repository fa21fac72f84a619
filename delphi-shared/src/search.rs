//! Search request and response types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /indexes/{uid}/search`.
///
/// All fields are optional; `None` fields are omitted from the request so
/// the service applies its own defaults. Build a query with the `with_*`
/// methods:
///
/// ```
/// use delphi_shared::SearchQuery;
///
/// let query = SearchQuery::new()
///     .with_query("carol")
///     .with_filter("genre = romance")
///     .with_limit(5);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Text to search for. An empty or missing query matches all documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Number of hits to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Maximum number of hits to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Filter expression over the filterable attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Sort directives such as `release_date:desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    /// Facets to compute distributions for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
    /// Attributes to include in the hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_retrieve: Option<Vec<String>>,
    /// Attributes to wrap matches in highlight tags for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_highlight: Option<Vec<String>>,
    /// Attributes to crop around the match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_crop: Option<Vec<String>>,
    /// Crop window length in words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_length: Option<u32>,
    /// Include match positions in the hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_matches_position: Option<bool>,
}

impl SearchQuery {
    /// Create a query matching all documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Skip this many hits.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limit the number of hits returned.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filter hits with an expression over the filterable attributes.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sort hits by these directives.
    pub fn with_sort<S: Into<String>>(mut self, sort: impl IntoIterator<Item = S>) -> Self {
        self.sort = Some(sort.into_iter().map(Into::into).collect());
        self
    }

    /// Compute facet distributions for these attributes.
    pub fn with_facets<S: Into<String>>(mut self, facets: impl IntoIterator<Item = S>) -> Self {
        self.facets = Some(facets.into_iter().map(Into::into).collect());
        self
    }

    /// Only return these attributes in the hits.
    pub fn with_attributes_to_retrieve<S: Into<String>>(
        mut self,
        attributes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.attributes_to_retrieve = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Wrap matches in highlight tags for these attributes.
    pub fn with_attributes_to_highlight<S: Into<String>>(
        mut self,
        attributes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.attributes_to_highlight = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Crop these attributes around the match.
    pub fn with_attributes_to_crop<S: Into<String>>(
        mut self,
        attributes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.attributes_to_crop = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Set the crop window length in words.
    pub fn with_crop_length(mut self, crop_length: u32) -> Self {
        self.crop_length = Some(crop_length);
        self
    }

    /// Include match positions in the hits.
    pub fn with_show_matches_position(mut self, show: bool) -> Self {
        self.show_matches_position = Some(show);
        self
    }
}

/// Response of `POST /indexes/{uid}/search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<T> {
    /// Matching documents, ordered by relevance.
    pub hits: Vec<T>,
    /// Offset that was applied.
    #[serde(default)]
    pub offset: Option<u32>,
    /// Page size that was applied.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Estimated number of documents matching the query.
    #[serde(default)]
    pub estimated_total_hits: Option<u64>,
    /// Per-facet value counts, when `facets` was requested.
    #[serde(default)]
    pub facet_distribution: Option<HashMap<String, HashMap<String, u64>>>,
    /// Server-side processing time in milliseconds.
    pub processing_time_ms: u64,
    /// The query text this response answers.
    pub query: String,
}
